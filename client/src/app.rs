use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use pandemap_shared::{
    CaseSource, Entity, MapFeature, MetricSelector, NavTarget, color_for, extract, rgb_css,
    tooltip_text,
};

use crate::data;
use crate::map::ChoroplethMap;
use crate::projection::Projection;
use crate::url_state;

/// Newtype wrappers to give the shared signals distinct types for Leptos
/// context. (Several share an inner type; without wrappers,
/// `provide_context` would overwrite one with another.)
#[derive(Clone, Copy)]
pub(crate) struct Hovered(pub RwSignal<Option<Entity>>);
#[derive(Clone, Copy)]
pub(crate) struct SelectedFips(pub RwSignal<Option<String>>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveMetric(pub RwSignal<MetricSelector>);
#[derive(Clone, Copy)]
pub(crate) struct PerCapita(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct UsFeatures(pub RwSignal<Option<Vec<MapFeature>>>);
#[derive(Clone, Copy)]
pub(crate) struct WorldFeatures(pub RwSignal<Option<Vec<MapFeature>>>);

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapScope {
    UnitedStates,
    World,
}

#[derive(Clone, Copy)]
pub(crate) struct ActiveScope(pub RwSignal<MapScope>);

const TAB_BASE_STYLE: &str = "padding: 5px 12px; border-radius: 5px; cursor: pointer; \
     font-family: 'JetBrains Mono', monospace; font-size: 0.78rem; \
     border: 1px solid #282c3e; transition: border-color 0.15s, background 0.15s, color 0.15s;";

/// Root application component. Provides the view/hover/selection state
/// via context, loads the snapshot and topologies, and keeps the metric
/// tab synchronized with the `detailed` URL parameter.
#[component]
pub fn App() -> impl IntoView {
    // Global signals
    let source: RwSignal<Option<CaseSource>> = RwSignal::new(None);
    let metric: RwSignal<MetricSelector> = RwSignal::new(url_state::read_metric());
    let per_capita: RwSignal<bool> = RwSignal::new(true);
    let hovered: RwSignal<Option<Entity>> = RwSignal::new(None);
    let selected: RwSignal<Option<String>> = RwSignal::new(None);
    let scope: RwSignal<MapScope> = RwSignal::new(MapScope::UnitedStates);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));
    let us_features: RwSignal<Option<Vec<MapFeature>>> = RwSignal::new(None);
    let world_features: RwSignal<Option<Vec<MapFeature>>> = RwSignal::new(None);
    let us_requested: RwSignal<bool> = RwSignal::new(false);
    let world_requested: RwSignal<bool> = RwSignal::new(false);

    // Provide via context so children can access
    provide_context(source);
    provide_context(mouse_pos);
    provide_context(Hovered(hovered));
    provide_context(SelectedFips(selected));
    provide_context(ActiveMetric(metric));
    provide_context(PerCapita(per_capita));
    provide_context(ActiveScope(scope));
    provide_context(UsFeatures(us_features));
    provide_context(WorldFeatures(world_features));

    // Restore the metric tab when the browser navigates through history.
    Effect::new(move || {
        url_state::bind_popstate(move |restored| metric.set(restored));
    });

    // Fetch the case snapshot once on mount.
    Effect::new(move || {
        spawn_local(async move {
            match data::fetch_snapshot().await {
                Ok(snapshot) => source.set(Some(snapshot)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Snapshot fetch failed: {e}").into());
                }
            }
        });
    });

    // Fetch the US topology as soon as the snapshot names its URL.
    Effect::new(move || {
        let Some(config) = source.with(|s| s.as_ref().map(|s| s.us_map.clone())) else {
            return;
        };
        if us_requested.get_untracked() {
            return;
        }
        us_requested.set(true);
        spawn_local(async move {
            match data::fetch_topology(&config.geo_url, config.scheme).await {
                Ok(topology) => {
                    if topology.skipped > 0 {
                        web_sys::console::info_1(
                            &format!("US topology: skipped {} features", topology.skipped).into(),
                        );
                    }
                    us_features.set(Some(topology.features));
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("US topology fetch failed: {e}").into());
                }
            }
        });
    });

    // The world topology loads lazily, on first switch to the world tab.
    Effect::new(move || {
        if scope.get() != MapScope::World {
            return;
        }
        let Some(config) = source.with(|s| s.as_ref().map(|s| s.world_map.clone())) else {
            return;
        };
        if world_requested.get_untracked() {
            return;
        }
        world_requested.set(true);
        spawn_local(async move {
            match data::fetch_topology(&config.geo_url, config.scheme).await {
                Ok(topology) => {
                    if topology.skipped > 0 {
                        web_sys::console::info_1(
                            &format!("World topology: skipped {} features", topology.skipped)
                                .into(),
                        );
                    }
                    world_features.set(Some(topology.features));
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("World topology fetch failed: {e}").into());
                }
            }
        });
    });

    view! {
        <div style="max-width: 1100px; margin: 0 auto; padding: 18px; background: #0c0e17; min-height: 100vh; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">
            <div style="display: flex; align-items: center; justify-content: space-between; flex-wrap: wrap; gap: 10px; margin-bottom: 12px;">
                <MetricTabs />
                <PerCapitaSwitch />
                <ScopeTabs />
            </div>
            <div
                style="background: #fff; border: 1px solid #282c3e; border-radius: 6px; overflow: hidden;"
                on:mousemove=move |e| {
                    mouse_pos.set((e.client_x() as f64, e.client_y() as f64));
                }
            >
                {move || match scope.get() {
                    MapScope::UnitedStates => view! { <UsMap /> }.into_any(),
                    MapScope::World => view! { <WorldMap /> }.into_any(),
                }}
            </div>
            <CountyNavButtons />
            {move || {
                source
                    .with(|s| s.as_ref().map(|s| s.generated_at))
                    .map(|generated_at| {
                        let stamp = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();
                        let age_hours = (chrono::Utc::now() - generated_at).num_hours();
                        let age = (age_hours >= 1).then(|| format!(" ({age_hours}h ago)"));
                        view! {
                            <div style="margin-top: 10px; font-size: 0.68rem; color: #5a5860; font-family: 'JetBrains Mono', monospace;">
                                "Data generated " {stamp} {age}
                            </div>
                        }
                    })
            }}
        </div>
        <Tooltip />
    }
}

/// Exclusive metric tab group. Switching tabs rewrites the `detailed`
/// parameter in place so a reload lands on the same tab.
#[component]
fn MetricTabs() -> impl IntoView {
    let ActiveMetric(metric) = expect_context();

    view! {
        <div style="display: flex; gap: 6px;">
            {MetricSelector::ALL
                .into_iter()
                .map(|selector| {
                    view! {
                        <button
                            style=TAB_BASE_STYLE
                            style:background=move || {
                                if metric.get() == selector { "#f5c542" } else { "#13161f" }
                            }
                            style:color=move || {
                                if metric.get() == selector { "#0c0e17" } else { "#9a9590" }
                            }
                            on:click=move |_| {
                                metric.set(selector);
                                url_state::write_metric(selector);
                            }
                        >
                            {selector.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// Per-capita switch. Local view state only; deliberately not URL-synced.
#[component]
fn PerCapitaSwitch() -> impl IntoView {
    let PerCapita(per_capita) = expect_context();

    view! {
        <label style="display: flex; align-items: center; gap: 6px; cursor: pointer; font-size: 0.78rem; color: #9a9590; font-family: 'JetBrains Mono', monospace;">
            <input
                type="checkbox"
                prop:checked=move || per_capita.get()
                on:change=move |_| per_capita.update(|v| *v = !*v)
            />
            "Per Capita"
        </label>
    }
}

/// US / world map switch. The hovered entity belongs to the outgoing
/// map, so it is cleared on switch; a selection survives until the next
/// click.
#[component]
fn ScopeTabs() -> impl IntoView {
    let ActiveScope(scope) = expect_context();
    let Hovered(hovered) = expect_context();

    let tab = move |target: MapScope, label: &'static str| {
        view! {
            <button
                style=TAB_BASE_STYLE
                style:background=move || {
                    if scope.get() == target { "#1a1d2a" } else { "#13161f" }
                }
                style:color=move || {
                    if scope.get() == target { "#e2e0d8" } else { "#5a5860" }
                }
                on:click=move |_| {
                    if scope.get_untracked() != target {
                        hovered.set(None);
                        scope.set(target);
                    }
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div style="display: flex; gap: 6px;">
            {tab(MapScope::UnitedStates, "United States")}
            {tab(MapScope::World, "World")}
        </div>
    }
}

#[component]
fn UsMap() -> impl IntoView {
    let source: RwSignal<Option<CaseSource>> = expect_context();
    let ActiveMetric(metric) = expect_context();
    let PerCapita(per_capita) = expect_context();
    let Hovered(hovered) = expect_context();
    let SelectedFips(selected) = expect_context();
    let UsFeatures(features) = expect_context();

    let resolve = Callback::new(move |id: String| {
        source.with(|s| {
            s.as_ref()
                .and_then(|s| s.county_for_id(&id))
                .cloned()
                .map(Entity::County)
        })
    });
    let fill = Callback::new(move |entity: Option<Entity>| {
        let selector = metric.get();
        let normalized = per_capita.get();
        let value = entity
            .as_ref()
            .and_then(|e| extract(e.summary(), e.population(), selector, normalized));
        rgb_css(color_for(selector, normalized, value))
    });
    let on_hover = Callback::new(move |entity: Option<Entity>| hovered.set(entity));
    // Clicking an unresolved feature clears the selection.
    let on_select = Callback::new(move |entity: Option<Entity>| {
        selected.set(match entity {
            Some(Entity::County(county)) => Some(county.fips),
            _ => None,
        });
    });
    // Light county borders on the confirmed tab, dark on the others.
    let stroke = Signal::derive(move || match metric.get() {
        MetricSelector::Confirmed => "#FFF",
        _ => "#000",
    });

    view! {
        {move || {
            let center = source
                .with(|s| s.as_ref().map(|s| s.us_map.center_lon))
                .unwrap_or(-96.0);
            match features.get() {
                Some(features) => {
                    view! {
                        <ChoroplethMap
                            features=features
                            projection=Projection::new(center)
                            stroke=stroke
                            resolve=resolve
                            fill=fill
                            on_hover=on_hover
                            on_select=on_select
                        />
                    }
                        .into_any()
                }
                None => view! { <MapLoading /> }.into_any(),
            }
        }}
    }
}

#[component]
fn WorldMap() -> impl IntoView {
    let source: RwSignal<Option<CaseSource>> = expect_context();
    let ActiveMetric(metric) = expect_context();
    let PerCapita(per_capita) = expect_context();
    let Hovered(hovered) = expect_context();
    let WorldFeatures(features) = expect_context();

    let resolve = Callback::new(move |code: String| {
        source.with(|s| {
            s.as_ref()
                .and_then(|s| s.country_for_code(&code))
                .map(Entity::Country)
        })
    });
    let fill = Callback::new(move |entity: Option<Entity>| {
        let selector = metric.get();
        let normalized = per_capita.get();
        let value = entity
            .as_ref()
            .and_then(|e| extract(e.summary(), e.population(), selector, normalized));
        rgb_css(color_for(selector, normalized, value))
    });
    let on_hover = Callback::new(move |entity: Option<Entity>| hovered.set(entity));

    view! {
        {move || {
            let center = source
                .with(|s| s.as_ref().map(|s| s.world_map.center_lon))
                .unwrap_or(10.0);
            match features.get() {
                Some(features) => {
                    view! {
                        <ChoroplethMap
                            features=features
                            projection=Projection::new(center)
                            stroke="#000"
                            backdrop=true
                            resolve=resolve
                            fill=fill
                            on_hover=on_hover
                        />
                    }
                        .into_any()
                }
                None => view! { <MapLoading /> }.into_any(),
            }
        }}
    }
}

#[component]
fn MapLoading() -> impl IntoView {
    view! {
        <div style="display: flex; align-items: center; justify-content: center; min-height: 320px; color: #5a5860; font-family: 'JetBrains Mono', monospace; font-size: 0.78rem; background: #0c0e17;">
            "Loading map"
        </div>
    }
}

/// Tooltip that follows the cursor while a feature with data is hovered.
/// No entity, or no data for the active metric, renders nothing at all.
#[component]
fn Tooltip() -> impl IntoView {
    let Hovered(hovered) = expect_context();
    let ActiveMetric(metric) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    let text = Memo::new(move |_| {
        let entity = hovered.get()?;
        tooltip_text(&entity, metric.get())
    });

    view! {
        {move || {
            let Some(text) = text.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            let (x, y) = mouse_pos.get();
            view! {
                <div
                    style:left=format!("{}px", x + 16.0)
                    style:top=format!("{}px", y - 8.0)
                    style="position: fixed; pointer-events: none; z-index: 100; background: #161921; border: 1px solid #282c3e; border-radius: 6px; padding: 7px 10px; box-shadow: 0 4px 16px rgba(0,0,0,0.5); max-width: 260px; font-size: 0.74rem; color: #e2e0d8; font-family: 'JetBrains Mono', monospace; white-space: pre-line;"
                >
                    {text}
                </div>
            }
                .into_any()
        }}
    }
}

/// Drill-down targets for the selected county: the county itself, its
/// metro when it has one, and its state. Exclusive group; picking one
/// hands its route to the page router.
#[component]
fn CountyNavButtons() -> impl IntoView {
    let source: RwSignal<Option<CaseSource>> = expect_context();
    let SelectedFips(selected) = expect_context();

    let targets = Memo::new(move |_| {
        let fips = selected.get()?;
        source.with(|s| {
            let s = s.as_ref()?;
            let county = s.county_for_id(&fips)?;
            Some(s.navigation_targets(county))
        })
    });

    view! {
        {move || {
            let Some(targets) = targets.get() else {
                return ().into_any();
            };
            view! {
                <div style="display: flex; gap: 6px; margin-top: 10px; flex-wrap: wrap;">
                    {targets
                        .into_iter()
                        .map(|NavTarget { label, route }| {
                            view! {
                                <button
                                    style=TAB_BASE_STYLE
                                    style:background="#13161f"
                                    style:color="#9a9590"
                                    on:click=move |_| url_state::navigate_to(&route)
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            }
                .into_any()
        }}
    }
}
