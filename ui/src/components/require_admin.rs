use yew::prelude::*;
use yew_router::prelude::*;

use crate::AdminRoute;
use crate::contexts::use_session;

#[derive(Properties, PartialEq)]
pub struct RequireAdminProps {
    pub children: Children,
}

/// Renders children only when admin credentials are stored; otherwise
/// sends the visitor to the admin login page.
#[function_component]
pub fn RequireAdmin(props: &RequireAdminProps) -> Html {
    let session = use_session();

    if !session.is_authenticated() {
        return html! { <Redirect<AdminRoute> to={AdminRoute::Login} /> };
    }

    html! {
        <>
            {for props.children.iter()}
        </>
    }
}
