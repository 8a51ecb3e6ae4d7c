use crate::api::ApiError;
use leptos::*;

/// Transient request failure. Validation failures from the server list
/// their `errors`; other failures show the error code.
#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(render_details).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

fn render_details(error: ApiError) -> View {
    let messages = validation_messages(&error);
    if !messages.is_empty() {
        return view! {
            <ul class="list-disc list-inside text-sm">
                {messages.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
            </ul>
        }
        .into_view();
    }
    if show_code(&error.code) {
        view! { <div class="text-xs opacity-75">{"Code: "}{error.code}</div> }.into_view()
    } else {
        ().into_view()
    }
}

fn validation_messages(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|err| err.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn show_code(code: &str) -> bool {
    !code.is_empty() && code != "UNKNOWN"
}

/// Inline message for a form field, e.g. a date that failed validation.
#[component]
pub fn FieldError(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ()>
            <p class="mt-1 text-xs text-status-error-text">{move || message.get().unwrap_or_default()}</p>
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Invalid period".into(),
                code: "HTTP_400".into(),
                details: Some(json!({
                    "errors": ["Start date cannot be in the past", "End date is required"]
                })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Invalid period"));
        assert!(html.contains("Start date cannot be in the past"));
        assert!(html.contains("End date is required"));
    }

    #[test]
    fn inline_error_renders_code_when_present() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::request_failed("Request failed")));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Request failed"));
        assert!(html.contains("Code: REQUEST_FAILED"));
    }

    #[test]
    fn field_error_renders_only_with_message() {
        let html = render_to_string(move || {
            let message = create_rw_signal(Some("Invalid date".to_string()));
            view! { <FieldError message={message.into()} /> }
        });
        assert!(html.contains("Invalid date"));

        let html = render_to_string(move || {
            let message = create_rw_signal(None::<String>);
            view! { <FieldError message={message.into()} /> }
        });
        assert!(!html.contains("text-status-error-text"));
    }
}
