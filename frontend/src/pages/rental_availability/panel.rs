use super::view_model::{use_rental_availability_view_model, RentalAvailabilityViewModel};
use crate::api::CarSummary;
use crate::availability::AvailabilityPeriod;
use crate::components::{
    error::{FieldError, InlineErrorMessage},
    layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
};
use crate::utils::time::{format_display, format_iso, today_in_app_tz};
use leptos::*;

#[component]
pub fn RentalAvailabilityPage(#[prop(default = None)] car_id: Option<i64>) -> impl IntoView {
    view! {
        <Layout>
            <RentalAvailabilityPanel car_id=car_id />
        </Layout>
    }
}

#[component]
fn RentalAvailabilityPanel(car_id: Option<i64>) -> impl IntoView {
    let vm = use_rental_availability_view_model(car_id);
    let today = format_iso(today_in_app_tz());

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-fg">"Rental Availability"</h1>
            <Show when=move || vm.notice.get().is_some()>
                <ErrorMessage message=Signal::derive(move || vm.notice.get().unwrap_or_default()) />
            </Show>
            <CarSelector vm=vm />
            <Show when=move || vm.car_id.get().is_some()>
                <InlineErrorMessage error={vm.error.into()} />
                <Show when=move || vm.success.get().is_some()>
                    <SuccessMessage message=Signal::derive(move || vm.success.get().unwrap_or_default()) />
                </Show>
                <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                    <h2 class="text-lg font-medium">"Add availability period"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                        <label class="block text-sm">
                            "Start date"
                            <input
                                type="date"
                                class="mt-1 w-full border rounded px-2 py-1"
                                min=today.clone()
                                prop:value=move || vm.start_input.get()
                                on:input=move |ev| vm.start_input.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="block text-sm">
                            "End date"
                            <input
                                type="date"
                                class="mt-1 w-full border rounded px-2 py-1"
                                min=today.clone()
                                prop:value=move || vm.end_input.get()
                                on:input=move |ev| vm.end_input.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <FieldError message={vm.form_error.into()} />
                    <button
                        class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                        disabled=move || vm.is_busy()
                        on:click=move |_| {
                            vm.submit_add();
                        }
                    >
                        {move || if vm.change_action.pending().get() { "Saving..." } else { "Add period" }}
                    </button>
                </div>
                <PeriodList vm=vm />
            </Show>
        </div>
    }
}

#[component]
fn CarSelector(vm: RentalAvailabilityViewModel) -> impl IntoView {
    let cars = move || vm.cars_resource.get();
    view! {
        <div>
            <h2 class="mb-4 text-xl font-semibold">"Select Rental Car"</h2>
            {move || match cars() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! {
                    <InlineErrorMessage error={Signal::derive(move || Some(err.clone()))} />
                }
                .into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <div class="rounded-lg border p-8 text-center">
                        <p>"No rental cars found"</p>
                        <p class="text-sm">"You need to have cars listed for rent to manage availability."</p>
                        <a href="/seller/list-car" class="underline">"List a Car for Rent"</a>
                    </div>
                }
                .into_view(),
                Some(Ok(list)) => list
                    .into_iter()
                    .map(|car| view! { <CarOption car=car vm=vm /> })
                    .collect_view(),
            }}
        </div>
    }
}

#[component]
fn CarOption(car: CarSummary, vm: RentalAvailabilityViewModel) -> impl IntoView {
    let id = car.id;
    let selected = move || vm.car_id.get() == Some(id);
    view! {
        <button
            class=move || {
                if selected() {
                    "rounded-lg border-2 p-4 text-left border-action-primary-bg"
                } else {
                    "rounded-lg border-2 p-4 text-left border-border"
                }
            }
            on:click=move |_| vm.pick_car(id)
        >
            <span class="font-semibold">{format!("{} {}", car.brand, car.model)}</span>
            <span class="block text-sm">{format!("${}/day", car.price)}</span>
        </button>
    }
}

#[component]
fn PeriodList(vm: RentalAvailabilityViewModel) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6">
            <h2 class="text-lg font-medium mb-3">"Available periods"</h2>
            {move || {
                if vm.load_action.pending().get() {
                    return view! { <LoadingSpinner /> }.into_view();
                }
                let periods = vm.periods.get();
                if periods.is_empty() {
                    return view! { <p class="text-sm">"No availability periods set."</p> }.into_view();
                }
                view! {
                    <ul class="divide-y">
                        {periods
                            .into_iter()
                            .map(|period| view! { <PeriodRow period=period vm=vm /> })
                            .collect_view()}
                    </ul>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn PeriodRow(period: AvailabilityPeriod, vm: RentalAvailabilityViewModel) -> impl IntoView {
    view! {
        <li class="flex items-center justify-between py-2">
            <span class="text-sm">{describe_period(&period)}</span>
            <button
                class="text-sm text-status-error-text disabled:opacity-50"
                disabled=move || vm.is_busy()
                on:click=move |_| vm.submit_remove(period)
            >
                "Remove"
            </button>
        </li>
    }
}

fn describe_period(period: &AvailabilityPeriod) -> String {
    let days = period.days();
    format!(
        "{} - {} ({} {})",
        format_display(period.start_date),
        format_display(period.end_date),
        days,
        if days == 1 { "day" } else { "days" }
    )
}
