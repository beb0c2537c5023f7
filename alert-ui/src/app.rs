use crate::bridge::{self, ApiContext};
use crate::components::facet_value::FacetValue;
use crate::components::push_alert_modal::PushAlertModal;
use alert_core::facets::{facet_counts, FacetFilters, FacetSelection};
use alert_core::types::AlertRecord;
use leptos::*;

const PRESET: &str = "feed";
const FACET_KEYS: [&str; 3] = ["source", "severity", "status"];

#[component]
pub fn App() -> impl IntoView {
    let api = store_value(ApiContext::new("http://127.0.0.1:8080", "dev-token"));

    let alerts = create_rw_signal(Vec::<AlertRecord>::new());
    let filters = create_rw_signal(FacetFilters::new());
    let show_modal = create_rw_signal(false);
    let load_error = create_rw_signal(None::<String>);

    let load_alerts = move || {
        spawn_local(async move {
            match bridge::fetch_alerts(&api.get_value(), PRESET).await {
                Ok(list) => {
                    alerts.set(list);
                    load_error.set(None);
                }
                Err(e) => load_error.set(Some(e)),
            }
        });
    };
    load_alerts();

    let visible = move || {
        let current = filters.get();
        alerts
            .get()
            .into_iter()
            .filter(|a| current.matches(a, &FACET_KEYS))
            .collect::<Vec<_>>()
    };

    view! {
      <div class="layout">
        <aside class="panel sidebar">
          <h2>"Filters"</h2>
          <For
            each=|| FACET_KEYS.to_vec()
            key=|k| *k
            children=move |facet_key: &'static str| {
              let counts = create_memo(move |_| facet_counts(&alerts.get(), facet_key));
              let on_select = Callback::new(move |selection: FacetSelection| {
                let universe: Vec<String> =
                  counts.get_untracked().into_iter().map(|(value, _)| value).collect();
                filters.update(|f| f.apply(facet_key, selection, &universe));
              });
              view! {
                <section class="facet-section">
                  <h3>{facet_key}</h3>
                  <For
                    each=move || counts.get()
                    key=|(value, _)| value.clone()
                    children=move |(value, count)| {
                      view! {
                        <FacetValue
                          label=value
                          count=count
                          facet_key=facet_key.to_string()
                          filters=filters
                          on_select=on_select
                          show_icon=true
                        />
                      }
                    }
                  />
                </section>
              }
            }
          />
        </aside>

        <section class="panel">
          <h2>"Alerts: " {PRESET}</h2>
          <div class="row">
            <button on:click=move |_| show_modal.set(true)>"Simulate alert"</button>
            <button class="secondary" on:click=move |_| load_alerts()>"Refresh"</button>
          </div>
          <ul class="alert-list">
            <For
              each=visible
              key=|a| a.id
              children=move |a| {
                view! {
                  <li>
                    <div><b>{a.title.clone()}</b></div>
                    <div class="meta">
                      {format!(
                        "{} sev={} status={}",
                        a.source_type,
                        a.severity.as_str(),
                        a.status.as_str(),
                      )}
                    </div>
                  </li>
                }
              }
            />
          </ul>
          <Show when=move || load_error.get().is_some()>
            <pre class="error">{move || load_error.get().unwrap_or_default()}</pre>
          </Show>
        </section>

        <Show when=move || show_modal.get()>
          <PushAlertModal
            preset_name=PRESET.to_string()
            api=api.get_value()
            on_close=move |_| show_modal.set(false)
            on_refresh_alerts=move |_| load_alerts()
            on_refresh_presets=move |_| {
              logging::log!("preset list refresh requested");
            }
          />
        </Show>
      </div>
    }
}
