use super::repository::BookingRepository;
use super::view_model::{use_booking_view_model, BookingViewModel};
use crate::api::{ApiClient, CarSummary, ListingType, PaymentMethod};
use crate::availability::{selectable_range, BookingRefusal};
use crate::components::{
    error::{FieldError, InlineErrorMessage},
    layout::{ErrorMessage, Layout, LoadingSpinner},
};
use crate::router::paths::AppRoute;
use crate::state::session::use_session;
use crate::utils::{
    navigation::use_navigator,
    time::{format_iso, today_in_app_tz},
};
use leptos::*;
use std::rc::Rc;

#[component]
pub fn CarPage(car_id: i64) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = BookingRepository::new_with_client(Rc::new(api));
    let car = create_resource(
        move || car_id,
        move |id| {
            let repo = repo.clone();
            async move { repo.car(id).await }
        },
    );

    view! {
        <Layout>
            {move || match car.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(car)) => view! { <CarDetails car=car /> }.into_view(),
            }}
        </Layout>
    }
}

#[component]
pub fn CarDetails(car: CarSummary) -> impl IntoView {
    let title = format!("{} {}", car.brand, car.model);
    let rentable = car.listing_type == ListingType::Rent;
    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-fg">{title}</h1>
            {if rentable {
                view! { <BookingWidget car=car /> }.into_view()
            } else {
                view! { <p class="text-lg font-semibold">{format!("${}", car.price)}</p> }.into_view()
            }}
        </div>
    }
}

#[component]
pub fn BookingWidget(car: CarSummary) -> impl IntoView {
    let vm = use_booking_view_model(&car);
    let price = car.price;
    let session = use_session().state;
    let navigator = store_value(use_navigator());
    let (min_date, max_date) = selectable_range(today_in_app_tz());
    let (min_date, max_date) = (format_iso(min_date), format_iso(max_date));

    create_effect(move |_| {
        if let Some(Ok(_)) = vm.booking_action.value().get() {
            navigator.with_value(|navigate| navigate(AppRoute::ClientBookings));
        }
    });

    let booking_error = Signal::derive(move || {
        vm.booking_action
            .value()
            .get()
            .and_then(|result| result.err())
    });
    let date_error = Signal::derive(move || {
        vm.form
            .with(|form| form.input_error().map(ToString::to_string))
    });
    let on_book = move |_| {
        let user = session.get_untracked().current_user;
        if let Err(BookingRefusal::LoginRequired) = vm.submit(user.as_ref()) {
            navigator.with_value(|navigate| navigate(AppRoute::Login));
        }
    };
    let pending = vm.booking_action.pending();

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <p class="text-xl font-semibold">{format!("${}/day", price)}</p>
            <div class="grid grid-cols-2 gap-3">
                <DateField label="Pickup date" value=vm.start_input vm=vm min=min_date.clone() max=max_date.clone() />
                <DateField label="Return date" value=vm.end_input vm=vm min=min_date max=max_date />
            </div>
            <FieldError message=date_error />
            <label class="block text-sm">
                "Payment method"
                <select
                    class="mt-1 w-full border rounded px-2 py-1"
                    on:change=move |ev| {
                        let method = match event_target_value(&ev).as_str() {
                            "CARD" => PaymentMethod::Card,
                            "BANK_TRANSFER" => PaymentMethod::BankTransfer,
                            _ => PaymentMethod::Cash,
                        };
                        vm.set_payment_method(method);
                    }
                >
                    <option value="CASH" selected=true>"Cash"</option>
                    <option value="CARD">"Card"</option>
                    <option value="BANK_TRANSFER">"Bank transfer"</option>
                </select>
            </label>
            {move || vm.form.with(|form| form.quote()).map(|quote| view! {
                <p class="text-sm">
                    {format!("{} days x ${} = ${:.2}", quote.days, price, quote.total)}
                </p>
            })}
            <p class="text-sm">{move || vm.form.with(availability_label)}</p>
            <Show when=move || vm.refusal.get().is_some()>
                <ErrorMessage message=refusal_message(vm.refusal) />
            </Show>
            <InlineErrorMessage error=booking_error />
            <button
                class="w-full px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                disabled=move || pending.get() || !vm.form.with(|form| form.can_book())
                on:click=on_book
            >
                {move || if pending.get() { "Booking..." } else { "Book now" }}
            </button>
        </div>
    }
}

#[component]
fn DateField(
    label: &'static str,
    value: RwSignal<String>,
    vm: BookingViewModel,
    min: String,
    max: String,
) -> impl IntoView {
    view! {
        <label class="block text-sm">
            {label}
            <input
                type="date"
                class="mt-1 w-full border rounded px-2 py-1"
                min=min
                max=max
                prop:value=move || value.get()
                on:change=move |ev| {
                    value.set(event_target_value(&ev));
                    vm.dates_changed();
                }
            />
        </label>
    }
}

fn availability_label(form: &crate::availability::BookingForm) -> &'static str {
    if form.is_checking() {
        return "Checking availability...";
    }
    match form.is_available() {
        None => "",
        Some(true) => "Available for the selected dates",
        Some(false) => "Selected dates are not available",
    }
}

fn refusal_message(refusal: RwSignal<Option<BookingRefusal>>) -> Signal<String> {
    Signal::derive(move || {
        refusal
            .get()
            .map(|reason| reason.to_string())
            .unwrap_or_default()
    })
}
