//! Mount points for the console views. The views themselves are built
//! separately; this shell only marks where each one is rendered.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ViewProps {
    pub name: &'static str,
    #[prop_or_default]
    pub item: Option<AttrValue>,
}

#[function_component(View)]
pub fn view(props: &ViewProps) -> Html {
    html! {
        <main id="view" data-view={props.name} data-item={props.item.clone()} />
    }
}
