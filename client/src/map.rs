use leptos::prelude::*;

use pandemap_shared::{Entity, MapFeature};

use crate::projection::{Projection, feature_bounds, graticule_path, path_data, sphere_path, view_box};

/// Choropleth renderer: one SVG path per topology feature, filled through
/// the supplied pipeline callbacks. Per feature: resolve the entity, ask
/// `fill` for its color, and wire hover/leave/click to the callbacks. A
/// feature that fails to resolve still renders (neutral fill from the
/// callback) and never aborts the rest of the pass.
///
/// The component holds no state of its own; everything it paints is a
/// projection of the signals its callbacks read.
#[component]
pub fn ChoroplethMap(
    features: Vec<MapFeature>,
    projection: Projection,
    #[prop(into)] stroke: Signal<&'static str>,
    /// Sphere outline + graticule behind the features (world maps).
    #[prop(optional)]
    backdrop: bool,
    #[prop(into)] resolve: Callback<String, Option<Entity>>,
    #[prop(into)] fill: Callback<Option<Entity>, String>,
    #[prop(into)] on_hover: Callback<Option<Entity>>,
    /// Selection is optional; maps without drill-down wire no click.
    #[prop(optional, into)]
    on_select: Option<Callback<Option<Entity>>>,
) -> impl IntoView {
    let frame = feature_bounds(&features, &projection)
        .map(view_box)
        .unwrap_or_else(|| "-180 -90 360 180".to_string());

    let paths = features
        .iter()
        .map(|feature| {
            let d = path_data(feature, &projection);
            let fill_id = feature.id.clone();
            let hover_id = feature.id.clone();
            let click_id = feature.id.clone();
            view! {
                <path
                    d=d
                    fill=move || fill.run(resolve.run(fill_id.clone()))
                    stroke=move || stroke.get()
                    stroke-width="0.3"
                    fill-rule="evenodd"
                    on:mouseenter=move |_| on_hover.run(resolve.run(hover_id.clone()))
                    on:mouseleave=move |_| on_hover.run(None)
                    on:click=move |_| {
                        if let Some(on_select) = on_select {
                            on_select.run(resolve.run(click_id.clone()));
                        }
                    }
                />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <svg viewBox=frame style="width: 100%; height: 100%; display: block;">
            {backdrop
                .then(|| {
                    view! {
                        <path d=sphere_path() fill="none" stroke="#E4E5E6" stroke-width="0.5" />
                        <path d=graticule_path() fill="none" stroke="#E4E5E6" stroke-width="0.5" />
                    }
                })}
            {paths}
        </svg>
    }
}
