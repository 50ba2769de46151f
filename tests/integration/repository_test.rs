//! Integration tests for the repository layer over HTTP.
//!
//! These tests are implemented in:
//! `crates/stratus-api/tests/http_gateway.rs`
//!
//! Covered scenarios:
//! - `get_sends_bearer_token_and_decodes_json`: Bearer token and JSON accept header on every request
//! - `error_status_carries_api_error_body`: Non-2xx status keeps the API's code/description/error_code
//! - `malformed_body_is_reported`: Undecodable response bodies surface as transport failures
//! - `unreachable_endpoint_is_a_connection_error`: Refused connections name the method and URL
//! - `restage_over_http_posts_empty_body`: Restage issues one POST with an empty body
//! - `read_over_http_maps_first_match`: Name lookup uses the escaped filter and inline relations
//! - `not_found_status_on_delete_is_not_found`: 404 on a GUID-addressed request is `NotFound`
//!
//! Address construction, pagination and error classification against a
//! recording gateway are covered by the unit tests in
//! `crates/stratus-api/src/repository/`, including:
//! - `list_orgs_rejects_a_page_cycle`: A `next_url` back to a fetched page fails instead of looping
