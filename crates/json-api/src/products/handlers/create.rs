//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::{form::FormData, header::LOCATION},
    prelude::*,
};

use bazaar_app::{
    domain::products::{
        data::{ListingDetails, NewProduct},
        records::{Category, ProductUuid},
    },
    uploads::{MAX_IMAGE_BYTES, UploadedImage},
};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Largest accepted request body: five full-size images plus the text fields.
pub(crate) const MAX_BODY_BYTES: u64 = 6 * MAX_IMAGE_BYTES;

/// Multipart field the images are sent under.
const IMAGES_FIELD: &str = "images";

/// Create Product Handler
///
/// Accepts `multipart/form-data` with the listing fields and one to five files
/// under `images`. New listings wait for moderation before they are shown.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let form = req
        .form_data()
        .await
        .or_400("Expected a multipart/form-data body")?;

    let new_product = NewProduct {
        uuid: ProductUuid::new(),
        seller: identity.user,
        details: listing_details(form)?,
        images: uploaded_images(form),
    };

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductResponse::for_viewer(product, Some(identity))))
}

fn listing_details(form: &FormData) -> Result<ListingDetails, StatusError> {
    let price = text(form, "price")
        .ok_or_else(|| StatusError::bad_request().brief("Price is required"))?
        .parse::<u64>()
        .or_400("Price must be a positive amount")?;

    let category = text(form, "category")
        .ok_or_else(|| StatusError::bad_request().brief("Category is required"))?
        .parse::<Category>()
        .or_400("Category must be one of shoes, clothes, accessories, electronics, other")?;

    Ok(ListingDetails {
        name: text(form, "name").unwrap_or_default(),
        price,
        category,
        size: text(form, "size"),
        color: text(form, "color"),
        location: text(form, "location"),
        contact_number: text(form, "contact_number").unwrap_or_default(),
        description: text(form, "description"),
    })
}

/// Trimmed value of a text field; blank counts as absent.
fn text(form: &FormData, field: &str) -> Option<String> {
    form.fields
        .get(field)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn uploaded_images(form: &FormData) -> Vec<UploadedImage> {
    form.files
        .get_vec(IMAGES_FIELD)
        .map(|files| {
            files
                .iter()
                .map(|file| UploadedImage {
                    file_name: file.name().unwrap_or_default().to_owned(),
                    temp_path: file.path().clone(),
                    size: file.size(),
                })
                .collect()
        })
        .unwrap_or_default()
}
