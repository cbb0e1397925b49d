use crate::core::selection::{TagOption, TagSelector};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TagSelectorProps {
    pub(crate) options: Vec<TagOption>,
    pub(crate) preselected: Vec<String>,
    /// Hidden field receiving the comma-separated selection.
    pub(crate) field: String,
}

/// Skills picker for the project form.
#[function_component(TagSelectorField)]
pub(crate) fn tag_selector_field(props: &TagSelectorProps) -> Html {
    let selector = {
        let options = props.options.clone();
        let preselected = props.preselected.clone();
        use_state(move || TagSelector::new(options, &preselected))
    };

    let update = |apply: fn(&mut TagSelector, String)| {
        let selector = selector.clone();
        Callback::from(move |value: String| {
            let mut next = (*selector).clone();
            apply(&mut next, value);
            selector.set(next);
        })
    };
    let oninput = update(|selector, value| {
        selector.set_search(value);
        selector.set_open(true);
    })
    .reform(|event: InputEvent| event.target_unchecked_into::<HtmlInputElement>().value());
    let onfocus = update(|selector, _| selector.set_open(true)).reform(|_: FocusEvent| String::new());
    let toggle = update(|selector, name| {
        selector.toggle(&name);
    });
    let remove = update(|selector, name| selector.remove(&name));

    let rows = selector.rows().into_iter().filter(|row| row.visible).map(|row| {
        let name = row.option.name.clone();
        let onclick = toggle.reform(move |_: MouseEvent| name.clone());
        html! {
            <div class={classes!("skill-option", row.selected.then_some("selected"))} data-skill={row.option.name.clone()} {onclick}>
                <i class={row.option.icon.clone()} />
                <span>{row.option.name.clone()}</span>
            </div>
        }
    });
    let chips = selector.selected().into_iter().map(|option| {
        let name = option.name.clone();
        let onclick = remove.reform(move |_: MouseEvent| name.clone());
        html! {
            <div class="skill-tag">
                <i class={option.icon.clone()} />
                <span>{option.name.clone()}</span>
                <span class="remove-skill" role="button" aria-label="Remove" {onclick}>{"×"}</span>
            </div>
        }
    });

    html! {
        <div class="skills-selector">
            <input type="search" class="skills-search" placeholder="Search skills..." {oninput} {onfocus} />
            <div class={classes!("skills-list", selector.is_open().then_some("active"))}>
                {for rows}
            </div>
            <div class="selected-skills">{for chips}</div>
            <input type="hidden" name={props.field.clone()} value={selector.form_value()} />
        </div>
    }
}
