use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub securitypin: String }

/// Multipart fields of the staff create/update forms.
#[allow(non_snake_case)]
#[derive(ToSchema)]
pub struct StaffForm {
    pub name: String,
    pub username: String,
    pub phonenumber: String,
    pub alternatephonenumber: Option<String>,
    pub email: String,
    pub dateofbirth: Option<String>,
    pub sex: String,
    pub maritalstatus: String,
    pub role: String,
    pub securitypin: String,
    pub joineddate: String,
    pub documentType: String,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub documentphoto: Option<Vec<u8>>,
}

#[allow(non_snake_case)]
#[derive(ToSchema)]
pub struct CustomerRequest {
    pub name: String,
    pub phonenumber: String,
    pub alternate_phone_number: Option<String>,
    pub email: Option<String>,
    pub maritalstatus: String,
    pub gender: String,
    pub town_or_village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub customerSince: String,
}

#[derive(ToSchema)]
pub struct MeasurementRequest {
    pub customer_id: Uuid,
    pub service_type: String,
    pub values: BTreeMap<String, f64>,
}

/// `order` is the JSON order document; `images` may repeat up to five times.
#[derive(ToSchema)]
pub struct OrderForm {
    pub order: String,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct AssignRequest { pub cutting_master_id: Option<Uuid>, pub tailor_id: Option<Uuid> }

#[derive(ToSchema)]
pub struct ItemStatusRequest { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::staff::create_staff,
        crate::routes::staff::list_staff,
        crate::routes::staff::get_staff,
        crate::routes::customers::create_customer,
        crate::routes::customers::list_customers,
        crate::routes::customers::search_customers,
        crate::routes::measurements::create_measurement,
        crate::routes::orders::create_order,
        crate::routes::orders::list_orders,
        crate::routes::orders::assign_item_staff,
        crate::routes::orders::update_item_status,
        crate::routes::files::get_file,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            StaffForm,
            CustomerRequest,
            MeasurementRequest,
            OrderForm,
            AssignRequest,
            ItemStatusRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "staff"),
        (name = "customers"),
        (name = "measurements"),
        (name = "orders"),
        (name = "files")
    )
)]
pub struct ApiDoc;
