use crate::bridge::{self, ApiContext};
use crate::components::facet_icons::FALLBACK_ICON;
use alert_core::catalog::AlertSource;
use alert_core::form::{FormField, PushForm};
use alert_core::submit::{begin_submit, finish_submit, SubmitHooks};
use leptos::*;

struct ModalHooks {
    on_refresh_alerts: Callback<()>,
    on_refresh_presets: Callback<()>,
    on_close: Callback<()>,
}

impl SubmitHooks for ModalHooks {
    fn refresh_alerts(&self) {
        self.on_refresh_alerts.call(());
    }
    fn refresh_presets(&self) {
        self.on_refresh_presets.call(());
    }
    fn closed(&self) {
        self.on_close.call(());
    }
}

/// Provider icon resolved by naming convention, swapped to the product
/// fallback when the asset is missing.
#[component]
fn SourceIcon(source_type: String) -> impl IntoView {
    let alt = source_type.clone();
    let src = create_rw_signal(format!("/icons/{source_type}-icon.png"));
    let fall_back = move |_| {
        if src.get_untracked() != FALLBACK_ICON {
            src.set(FALLBACK_ICON.to_string());
        }
    };
    view! { <img class="source-icon" src=move || src.get() alt=alt on:error=fall_back/> }
}

/// Form for pushing a hand-edited alert payload at the gateway, seeded
/// from the selected source's example.
#[component]
pub fn PushAlertModal(
    preset_name: String,
    api: ApiContext,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_refresh_alerts: Callback<()>,
    #[prop(into)] on_refresh_presets: Callback<()>,
) -> impl IntoView {
    let api = store_value(api);
    let preset = store_value(preset_name);

    let form = create_rw_signal(PushForm::new());
    let sources = create_rw_signal(Vec::<AlertSource>::new());
    let load_error = create_rw_signal(None::<String>);

    spawn_local(async move {
        match bridge::fetch_providers(&api.get_value()).await {
            Ok(list) => sources.set(list),
            Err(e) => load_error.set(Some(e)),
        }
    });

    let select_source = move |ev: ev::Event| {
        let picked = event_target_value(&ev);
        let source = sources.with(|list| {
            list.iter()
                .find(|s| s.source_type == picked)
                .cloned()
        });
        if let Some(source) = source {
            form.update(|f| f.select_source(source));
        }
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let mut prepared = None;
        form.update(|f| prepared = begin_submit(f).ok());
        let Some(prepared) = prepared else {
            return;
        };
        spawn_local(async move {
            let result = bridge::push_alert(
                &api.get_value(),
                &prepared.source_type,
                &preset.get_value(),
                &prepared.body,
            )
            .await;
            let hooks = ModalHooks {
                on_refresh_alerts,
                on_refresh_presets,
                on_close,
            };
            form.update(|f| {
                finish_submit(f, result, &hooks);
            });
        });
    };

    let source_error = move || {
        form.with(|f| f.field_error(FormField::Source).map(ToString::to_string))
    };
    let payload_error = move || {
        form.with(|f| f.field_error(FormField::Payload).map(ToString::to_string))
    };
    let selected_type = move || {
        form.with(|f| f.source.as_ref().map(|s| s.source_type.clone()))
    };

    view! {
      <div class="modal-backdrop">
        <div class="modal">
          <h2>"Simulate alert"</h2>
          <form on:submit=submit>
            <label>"Alert Source"</label>
            <div class="row">
              {move || selected_type().map(|source_type| view! { <SourceIcon source_type/> })}
              <select on:change=select_source>
                <option value="" disabled selected=move || selected_type().is_none()>
                  "Select alert source"
                </option>
                <For
                  each=move || sources.get()
                  key=|s| s.source_type.clone()
                  children=move |s| {
                    let value = s.source_type.clone();
                    let picked = s.source_type.clone();
                    view! {
                      <option
                        value=value
                        selected=move || selected_type().as_deref() == Some(picked.as_str())
                      >
                        {s.name.to_lowercase()}
                      </option>
                    }
                  }
                />
              </select>
            </div>
            <Show when=move || source_error().is_some()>
              <div class="field-error">{source_error}</div>
            </Show>

            <Show when=move || selected_type().is_some()>
              <div class="callout">
                <b>"About alert payload"</b>
                " Feel free to edit the payload as you want. However, some of the \
                 providers expect specific fields, so be careful."
              </div>
              <label>"Alert Payload"</label>
              <textarea
                rows=20
                prop:value=move || form.with(|f| f.payload.clone())
                on:input=move |ev| form.update(|f| f.set_payload(event_target_value(&ev)))
              ></textarea>
              <Show when=move || payload_error().is_some()>
                <div class="field-error">{payload_error}</div>
              </Show>
            </Show>

            <Show when=move || form.with(|f| f.banner().is_some())>
              <div class="callout callout-error">
                <b>"Error"</b>
                " "
                {move || form.with(|f| f.banner().unwrap_or_default().to_string())}
              </div>
            </Show>
            <Show when=move || load_error.get().is_some()>
              <div class="callout callout-error">
                {move || load_error.get().unwrap_or_default()}
              </div>
            </Show>

            <div class="row">
              <button type="submit" prop:disabled=move || form.with(|f| f.is_submitting())>
                "Submit"
              </button>
              <button type="button" class="secondary" on:click=move |_| on_close.call(())>
                "Cancel"
              </button>
            </div>
          </form>
        </div>
      </div>
    }
}
