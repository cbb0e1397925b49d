use crate::core::list::{FilterOption, SortKey};
use crate::features::SortChoice;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ListToolbarProps {
    pub(crate) search: String,
    pub(crate) placeholder: &'static str,
    pub(crate) filters: Vec<FilterOption>,
    pub(crate) sorts: &'static [SortChoice],
    pub(crate) sort: Option<SortKey>,
    pub(crate) on_search: Callback<String>,
    pub(crate) on_filter: Callback<String>,
    pub(crate) on_sort: Callback<String>,
}

/// Search box, filter buttons and sort select.
#[function_component(ListToolbar)]
pub(crate) fn list_toolbar(props: &ListToolbarProps) -> Html {
    let oninput = props
        .on_search
        .reform(|event: InputEvent| event.target_unchecked_into::<HtmlInputElement>().value());
    let onchange = props
        .on_sort
        .reform(|event: Event| event.target_unchecked_into::<HtmlSelectElement>().value());
    let current_sort = props.sort.map(SortKey::as_value).unwrap_or_default();

    html! {
        <div class="list-toolbar">
            <input
                type="search"
                class="search-input"
                placeholder={props.placeholder}
                value={props.search.clone()}
                {oninput}
            />
            <div class="filter-buttons">
                {for props.filters.iter().map(|option| {
                    let value = option.value.clone();
                    let onclick = props.on_filter.reform(move |_: MouseEvent| value.clone());
                    html! {
                        <button
                            type="button"
                            class={classes!("filter-btn", option.active.then_some("active"))}
                            data-filter={option.value.clone()}
                            {onclick}
                        >
                            {option.label.clone()}
                            <span class="filter-count">{option.count}</span>
                        </button>
                    }
                })}
            </div>
            <select class="sort-select" {onchange}>
                {for props.sorts.iter().map(|choice| {
                    let value = choice.key.as_value();
                    html! {
                        <option value={value} selected={value == current_sort}>{choice.label}</option>
                    }
                })}
            </select>
        </div>
    }
}
