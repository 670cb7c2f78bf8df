pub mod api_key_form;
pub mod audit_form;
pub mod audit_result;
pub mod layout;
pub mod preview_panel;
pub mod priority_badge;
pub mod score_circle;
pub mod section_card;
pub mod status_badge;
