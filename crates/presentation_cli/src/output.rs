//! Terminal rendering of widget state

use application::{AddressChosen, Phase, QueryState, render_plain};
use domain::AddressCandidate;
use integration_geocoding::ProviderKind;

use crate::terminal_map::CameraMove;

pub fn print_providers() {
    for kind in ProviderKind::ALL {
        let key = if kind.requires_api_key() {
            "API key required"
        } else {
            "no key"
        };
        println!("{:<10} {key}", kind.as_str());
    }
}

pub fn print_candidates(candidates: &[AddressCandidate]) {
    for (position, candidate) in candidates.iter().enumerate() {
        println!("{:>2}. {}", position + 1, candidate.original.formatted);
        for line in render_plain(&candidate.address).lines() {
            println!("    {line}");
        }
        println!("    ({})", candidate.coordinate);
    }
}

pub fn print_state(state: &QueryState) {
    match state.phase() {
        Phase::Idle => println!("(no results)"),
        Phase::Pending => println!("Searching for '{}'...", state.last_query),
        Phase::Results => print_candidates(&state.candidates),
        Phase::Empty | Phase::Failed => {
            if let Some(notice) = state.notice {
                println!("{}", notice.message());
            }
        },
    }
}

pub fn print_chosen(chosen: &AddressChosen, camera: Option<CameraMove>) {
    println!("Chosen: {}", chosen.place.original.formatted);
    for line in render_plain(&chosen.address.details).lines() {
        println!("    {line}");
    }
    println!(
        "Map position: {:.2}, {:.2}",
        chosen.coordinate.x, chosen.coordinate.y
    );
    match camera {
        Some(CameraMove::Fit(extent)) => println!(
            "View fitted to [{:.2}, {:.2}, {:.2}, {:.2}]",
            extent.min_x, extent.min_y, extent.max_x, extent.max_y
        ),
        Some(CameraMove::FlyTo { center, resolution }) => println!(
            "View centered on {:.2}, {:.2} at resolution {resolution}",
            center.x, center.y
        ),
        None => {},
    }
    if let Some(feature) = &chosen.feature {
        println!("Marker: {}", feature.id);
    }
}
