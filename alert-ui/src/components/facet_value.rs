use crate::components::facet_icons::{icon_for, FacetGlyph};
use alert_core::facets::{FacetFilters, FacetSelection};
use leptos::*;

/// One selectable value in a facet list. The row never mutates filter
/// state: every click is translated into a `FacetSelection` and handed
/// to `on_select`.
#[component]
pub fn FacetValue(
    label: String,
    count: usize,
    facet_key: String,
    #[prop(into)] filters: Signal<FacetFilters>,
    #[prop(into)] on_select: Callback<FacetSelection>,
    #[prop(optional)] show_icon: bool,
) -> impl IntoView {
    let icon = show_icon.then(|| icon_for(&facet_key, &label));
    let title = label.clone();
    let text = label.clone();

    let label = store_value(label);
    let facet_key = store_value(facet_key);

    let hovered = create_rw_signal(false);

    let is_selected =
        move || filters.with(|f| f.is_selected(&facet_key.get_value(), &label.get_value()));
    let is_exclusive =
        move || filters.with(|f| f.is_exclusive(&facet_key.get_value(), &label.get_value()));

    // Row and checkbox clicks both mean "toggle"; stopping propagation
    // keeps the checkbox click from re-firing through the row handler.
    let toggle = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        on_select.call(FacetSelection::Toggle(label.get_value()));
    };

    let action = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        let selection =
            filters.with(|f| f.action_for(&facet_key.get_value(), &label.get_value()));
        on_select.call(selection);
    };

    view! {
      <div
        class="facet-value"
        title=title
        on:click=toggle
        on:mouseenter=move |_| hovered.set(true)
        on:mouseleave=move |_| hovered.set(false)
      >
        <input type="checkbox" prop:checked=is_selected on:click=toggle/>
        {icon.flatten().map(|glyph| match glyph {
            FacetGlyph::Image { src } => view! {
              <img class="facet-icon" src=src alt=label.get_value()/>
            }
            .into_view(),
            FacetGlyph::Glyph { symbol, color } => view! {
              <span class="facet-icon" style=format!("color: {color}")>{symbol}</span>
            }
            .into_view(),
        })}
        <span class="facet-label">{text}</span>
        <Show when=move || hovered.get()>
          <button class="facet-action" on:click=action>
            {move || if is_exclusive() { "All" } else { "Only" }}
          </button>
        </Show>
        <Show when=move || !hovered.get() && (count > 0)>
          <span class="facet-count">{count}</span>
        </Show>
      </div>
    }
}
