//! Application services - Use case implementations

pub mod address_template;
mod query_controller;

pub use address_template::{render_html, render_plain};
pub use query_controller::{
    AddressChosen, ChosenAddress, FIT_DURATION, FLY_TO_DURATION, FLY_TO_RESOLUTION, Phase,
    QueryController, QueryOutcome, QueryState, ResultNotice,
};
