//! Evacroute CLI library.
//!
//! Command handlers, hazard scenario flags, terminal styling and output
//! formatting for the `evacroute` binary.

pub mod commands;
pub mod output;
pub mod scenario;
pub mod terminal;

use evacroute_lib::Error as RouteError;

/// Render an error for the terminal, with hints for common mistakes.
pub fn describe_error(err: &anyhow::Error) -> String {
    let lib_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<RouteError>());

    match lib_error {
        Some(RouteError::UnknownNode { id, suggestions }) => {
            let mut message = format!("Unknown node '{id}'.");
            match suggestions.as_slice() {
                [] => {}
                [only] => message.push_str(&format!(" Did you mean '{only}'?")),
                many => message.push_str(&format!(
                    " Did you mean one of: {}?",
                    many.iter()
                        .map(|s| format!("'{s}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            }
            message.push_str("\nRun `evacroute nodes` to list every node id.");
            message
        }
        Some(RouteError::InvalidK { .. }) | Some(RouteError::InvalidRouteCount { .. }) => {
            format!("Error: {err:#}\nCounts must be at least 1.")
        }
        _ => format!("Error: {err:#}"),
    }
}
