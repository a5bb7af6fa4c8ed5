use crate::request::form_encode;

/// Routing key shared by every batch of one dimension: `<server id>/<dimension id>`, both
/// form-encoded
pub fn dimension_key(identifier: &str, dimension: &str) -> String {
    format!("{}/{}", form_encode(identifier), form_encode(dimension))
}

pub fn chunks(identifier: &str, dimension: &str) -> String {
    format!("v1/chunks/{}", dimension_key(identifier, dimension))
}

pub fn server_meta(identifier: &str) -> String {
    format!("v1/meta/{}", form_encode(identifier))
}

pub fn dimension_meta(identifier: &str, dimension: &str) -> String {
    format!("v1/meta/{}", dimension_key(identifier, dimension))
}

/// Browser link to the rendered map of one dimension
pub fn map_page(base: &str, identifier: &str, dimension: &str) -> String {
    format!("{}map/{}", base, dimension_key(identifier, dimension))
}
