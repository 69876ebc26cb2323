use payloads::StatusCounts;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub counts: StatusCounts,
}

#[function_component]
pub fn StatsTiles(props: &Props) -> Html {
    let counts = props.counts;
    let tiles = [
        ("Pending review", counts.pending, "text-amber-700"),
        ("Live", counts.live, "text-emerald-700"),
        ("Total", counts.reviewable_total(), "text-stone-900"),
    ];

    html! {
        <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
            {for tiles.into_iter().map(|(label, value, color)| html! {
                <div class="bg-white rounded-lg border border-stone-200 p-4">
                    <p class="text-sm text-stone-500">{label}</p>
                    <p class={classes!("text-3xl", "font-semibold", color)}>
                        {value}
                    </p>
                </div>
            })}
        </div>
    }
}
