//! OpenAPI documentation for the management API.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api::handlers;
use crate::api::models;

/// Bearer token security scheme shared by all authenticated endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token obtained from `/api/auth/login` or `/api/gym-auth/login`:\n\n\
                            ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::probes::health,
        handlers::auth::login,
        handlers::auth::gym_login,
        handlers::gyms::list_gyms,
        handlers::gyms::create_gym,
        handlers::gyms::get_gym,
        handlers::gyms::update_gym,
        handlers::gyms::delete_gym,
        handlers::billing::list_billing_records,
        handlers::billing::create_billing_record,
        handlers::billing::get_billing_record,
        handlers::billing::update_billing_record,
        handlers::billing::delete_billing_record,
        handlers::support::list_tickets,
        handlers::support::create_ticket,
        handlers::support::get_ticket,
        handlers::support::update_ticket,
        handlers::support::delete_ticket,
        handlers::logs::list_logs,
        handlers::logs::export_logs,
        handlers::members::list_members,
        handlers::members::create_member,
        handlers::members::get_member,
        handlers::members::update_member,
        handlers::members::delete_member,
        handlers::subscriptions::list_subscriptions,
        handlers::subscriptions::create_subscription,
        handlers::subscriptions::get_subscription,
        handlers::subscriptions::update_subscription,
        handlers::subscriptions::delete_subscription,
        handlers::classes::list_classes,
        handlers::classes::create_class,
        handlers::classes::get_class,
        handlers::classes::update_class,
        handlers::classes::delete_class,
        handlers::lockers::list_lockers,
        handlers::lockers::create_locker,
        handlers::lockers::get_locker,
        handlers::lockers::update_locker,
        handlers::lockers::delete_locker,
        handlers::expenses::list_expenses,
        handlers::expenses::create_expense,
        handlers::expenses::get_expense,
        handlers::expenses::update_expense,
        handlers::expenses::delete_expense,
        handlers::payroll::list_payroll,
        handlers::payroll::create_payroll_record,
        handlers::payroll::get_payroll_record,
        handlers::payroll::update_payroll_record,
        handlers::payroll::delete_payroll_record,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::reservations::list_reservations,
        handlers::reservations::create_reservation,
        handlers::reservations::get_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::delete_reservation,
        handlers::deposits::list_deposits,
        handlers::deposits::create_deposit,
        handlers::deposits::get_deposit,
        handlers::deposits::update_deposit,
        handlers::deposits::delete_deposit,
        handlers::attendance::list_attendance,
        handlers::attendance::check_in,
        handlers::attendance::get_attendance_record,
        handlers::attendance::check_out,
        handlers::attendance::delete_attendance_record,
    ),
    components(schemas(
        models::accounts::Role,
        models::accounts::CurrentAccount,
        models::auth::LoginRequest,
        models::auth::LoginResponse,
        models::gyms::GymCreate,
        models::gyms::GymUpdate,
        models::gyms::GymResponse,
        models::billing::BillingStatus,
        models::billing::BillingCreate,
        models::billing::BillingUpdate,
        models::billing::BillingResponse,
        models::support::TicketStatus,
        models::support::SupportTicketCreate,
        models::support::SupportTicketUpdate,
        models::support::SupportTicketResponse,
        models::logs::AuditLogResponse,
        models::members::MemberStatus,
        models::members::MemberCreate,
        models::members::MemberUpdate,
        models::members::MemberResponse,
        models::subscriptions::SubscriptionStatus,
        models::subscriptions::SubscriptionCreate,
        models::subscriptions::SubscriptionUpdate,
        models::subscriptions::SubscriptionResponse,
        models::classes::ClassCreate,
        models::classes::ClassUpdate,
        models::classes::ClassResponse,
        models::lockers::LockerStatus,
        models::lockers::LockerCreate,
        models::lockers::LockerUpdate,
        models::lockers::LockerResponse,
        models::expenses::ExpenseCreate,
        models::expenses::ExpenseUpdate,
        models::expenses::ExpenseResponse,
        models::payroll::PayrollStatus,
        models::payroll::PayrollRecordCreate,
        models::payroll::PayrollRecordUpdate,
        models::payroll::PayrollRecordResponse,
        models::products::ProductCreate,
        models::products::ProductUpdate,
        models::products::ProductResponse,
        models::reservations::ReservationStatus,
        models::reservations::ReservationCreate,
        models::reservations::ReservationUpdate,
        models::reservations::ReservationResponse,
        models::deposits::DepositCreate,
        models::deposits::DepositUpdate,
        models::deposits::DepositResponse,
        models::attendance::AttendanceCreate,
        models::attendance::AttendanceCheckout,
        models::attendance::AttendanceResponse,
        handlers::probes::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "probes", description = "Health checks"),
        (name = "auth", description = "Portal logins"),
        (name = "gyms", description = "Gym provisioning and lifecycle"),
        (name = "billing", description = "Platform billing records"),
        (name = "support", description = "Support tickets"),
        (name = "logs", description = "Platform audit log"),
        (name = "members", description = "Gym members"),
        (name = "subscriptions", description = "Member subscriptions"),
        (name = "classes", description = "Class schedule"),
        (name = "lockers", description = "Locker assignments"),
        (name = "expenses", description = "Gym expenses"),
        (name = "payroll", description = "Staff payroll"),
        (name = "products", description = "Shop products"),
        (name = "reservations", description = "Class reservations"),
        (name = "deposits", description = "Member deposits"),
        (name = "attendance", description = "Attendance tracking"),
    ),
    info(
        title = "gymctl API",
        description = "Multi-tenant gym management platform: a back office for the \
        platform operator and a per-gym console for admins, backed by a shared \
        Postgres database with strict tenant isolation."
    )
)]
pub struct ApiDoc;
