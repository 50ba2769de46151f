//! Integration tests for the requirement-gated command pipeline.
//!
//! These tests are implemented in:
//! `crates/stratus-cli/src/commands/` and `crates/stratus-cli/src/requirements/`
//!
//! Covered scenarios:
//! - `failed_login_never_resolves_the_organization`: A failing login stops evaluation before any org lookup
//! - `stops_at_first_failure`: Later requirements stay unevaluated after a failure
//! - `wrong_argument_count_is_incorrect_usage`: Usage errors are rendered before any requirement runs
//! - `failed_requirement_prevents_run`: Commands only run once every requirement holds
//! - `run_error_is_rendered_as_failed`: Repository failures render `FAILED` and the error text
//! - `run_shows_progress_then_groups`: `env` prints progress, `OK`, then the variable groups
//! - `all_empty_groups_render_four_messages_and_no_headings`: Four independent "not set" messages
//! - `nested_system_values_keep_declaration_order`: Nested system values render in server order
//! - `shows_domains_quota_and_spaces`: `org` renders domains, quota and spaces
//! - `missing_app_is_a_warning_not_a_failure`: `delete` of an unknown app warns and succeeds
//! - `issues_one_restage_request`: `restage` triggers exactly one restage request
//! - `saves_org_and_space_keeping_credentials`: `target` persists the resolved org and space
//! - `unknown_space_fails_without_writing`: `target` leaves the config untouched on failure
