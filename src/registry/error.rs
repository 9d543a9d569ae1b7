//! Registry lookup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{}", no_machine(.name))]
    NoMachine { name: Option<String> },

    #[error("Too many state machines ({}) match this subject", .names.join(", "))]
    TooManyMachines { names: Vec<String> },
}

fn no_machine(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("No state machine named \"{name}\" supports this subject"),
        None => "No state machine supports this subject".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_machines() {
        let err = RegistryError::NoMachine {
            name: Some("article".into()),
        };
        assert_eq!(
            err.to_string(),
            "No state machine named \"article\" supports this subject"
        );

        let err = RegistryError::TooManyMachines {
            names: vec!["article".into(), "review".into()],
        };
        assert_eq!(
            err.to_string(),
            "Too many state machines (article, review) match this subject"
        );
    }
}
