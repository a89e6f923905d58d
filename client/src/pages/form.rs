//! Shared form plumbing for the inference pages.
//!
//! DESIGN
//! ======
//! Each form is described by a static table of [`FieldSpec`]s whose names
//! match the wire and validation names of the params struct, so the inputs,
//! the request body and the "Please fill in the X field." message always
//! agree (the message spells `soil_type` as "soil type"). [`spawn_request`]
//! runs one submission through a page's [`RequestState`] and reports the
//! outcome as a toast.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::future::Future;

use advisory::{CropParams, FertilizerParams, SubmitError};
use leptos::prelude::*;

use crate::state::request::RequestState;
use crate::state::toast::ToastState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Number,
    Text,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
        }
    }
}

/// One labelled input bound to a `String` field of `T`.
pub struct FieldSpec<T> {
    /// Wire/validation name, also used as the element id.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    pub read: fn(&T) -> &str,
    pub write: fn(&mut T) -> &mut String,
}

pub static CROP_FIELDS: [FieldSpec<CropParams>; 7] = [
    FieldSpec {
        name: "N",
        label: "Nitrogen (N)",
        placeholder: "e.g., 90",
        kind: InputKind::Number,
        read: |p| p.nitrogen.as_str(),
        write: |p| &mut p.nitrogen,
    },
    FieldSpec {
        name: "P",
        label: "Phosphorus (P)",
        placeholder: "e.g., 42",
        kind: InputKind::Number,
        read: |p| p.phosphorus.as_str(),
        write: |p| &mut p.phosphorus,
    },
    FieldSpec {
        name: "K",
        label: "Potassium (K)",
        placeholder: "e.g., 43",
        kind: InputKind::Number,
        read: |p| p.potassium.as_str(),
        write: |p| &mut p.potassium,
    },
    FieldSpec {
        name: "temperature",
        label: "Temperature (°C)",
        placeholder: "e.g., 20.8",
        kind: InputKind::Number,
        read: |p| p.temperature.as_str(),
        write: |p| &mut p.temperature,
    },
    FieldSpec {
        name: "humidity",
        label: "Humidity (%)",
        placeholder: "e.g., 82",
        kind: InputKind::Number,
        read: |p| p.humidity.as_str(),
        write: |p| &mut p.humidity,
    },
    FieldSpec {
        name: "ph",
        label: "Soil pH",
        placeholder: "e.g., 6.5",
        kind: InputKind::Number,
        read: |p| p.ph.as_str(),
        write: |p| &mut p.ph,
    },
    FieldSpec {
        name: "rainfall",
        label: "Rainfall (mm)",
        placeholder: "e.g., 202",
        kind: InputKind::Number,
        read: |p| p.rainfall.as_str(),
        write: |p| &mut p.rainfall,
    },
];

pub static FERTILIZER_FIELDS: [FieldSpec<FertilizerParams>; 8] = [
    FieldSpec {
        name: "temperature",
        label: "Temperature (°C)",
        placeholder: "e.g., 26",
        kind: InputKind::Number,
        read: |p| p.temperature.as_str(),
        write: |p| &mut p.temperature,
    },
    FieldSpec {
        name: "humidity",
        label: "Humidity (%)",
        placeholder: "e.g., 52",
        kind: InputKind::Number,
        read: |p| p.humidity.as_str(),
        write: |p| &mut p.humidity,
    },
    FieldSpec {
        name: "moisture",
        label: "Soil Moisture (%)",
        placeholder: "e.g., 38",
        kind: InputKind::Number,
        read: |p| p.moisture.as_str(),
        write: |p| &mut p.moisture,
    },
    FieldSpec {
        name: "soil_type",
        label: "Soil Type",
        placeholder: "e.g., Loamy",
        kind: InputKind::Text,
        read: |p| p.soil_type.as_str(),
        write: |p| &mut p.soil_type,
    },
    FieldSpec {
        name: "crop_type",
        label: "Crop Type",
        placeholder: "e.g., Maize",
        kind: InputKind::Text,
        read: |p| p.crop_type.as_str(),
        write: |p| &mut p.crop_type,
    },
    FieldSpec {
        name: "N",
        label: "Nitrogen (N)",
        placeholder: "e.g., 37",
        kind: InputKind::Number,
        read: |p| p.nitrogen.as_str(),
        write: |p| &mut p.nitrogen,
    },
    FieldSpec {
        name: "P",
        label: "Phosphorus (P)",
        placeholder: "e.g., 0",
        kind: InputKind::Number,
        read: |p| p.phosphorus.as_str(),
        write: |p| &mut p.phosphorus,
    },
    FieldSpec {
        name: "K",
        label: "Potassium (K)",
        placeholder: "e.g., 0",
        kind: InputKind::Number,
        read: |p| p.potassium.as_str(),
        write: |p| &mut p.potassium,
    },
];

/// Render `fields` as labelled inputs two-way bound to `params`.
pub fn render_fields<T>(fields: &'static [FieldSpec<T>], params: RwSignal<T>) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    fields
        .iter()
        .map(|field| {
            view! {
                <div class="field">
                    <label for=field.name>{field.label}</label>
                    <input
                        id=field.name
                        type=field.kind.as_str()
                        step="any"
                        placeholder=field.placeholder
                        prop:value=move || params.with(|p| (field.read)(p).to_owned())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            params.update(|p| *(field.write)(p) = value);
                        }
                    />
                </div>
            }
        })
        .collect_view()
}

/// Run `task` as the page's single in-flight request.
///
/// Ignored while another request is loading. On success the result replaces
/// the previous one and `success` is shown; on failure the error message is
/// shown and the previous result stays.
pub fn spawn_request<T, Fut>(
    request: RwSignal<RequestState<T>>,
    toasts: RwSignal<ToastState>,
    success: &'static str,
    task: Fut,
) where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, SubmitError>> + 'static,
{
    let mut started = false;
    request.update(|state| started = state.begin());
    if !started {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::util::notify;

        match task.await {
            Ok(value) => {
                request.update(|state| state.succeed(value));
                notify::success(toasts, success);
            }
            Err(e) => {
                if !e.is_validation() {
                    log::warn!("inference request failed: {e}");
                }
                request.update(RequestState::fail);
                notify::error(toasts, e.to_string());
            }
        }
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, success, task);
        request.update(RequestState::fail);
    }
}
