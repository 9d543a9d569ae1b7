//! Macros for ergonomic definition construction.

/// Declare a [`Definition`](crate::core::Definition) inline.
///
/// Expands to a call to `Definition::new`, so the result is a
/// `Result<Definition<T>, BuildError>` and unknown places are reported
/// the same way.
///
/// # Example
///
/// ```
/// use waymark::core::Definition;
/// use waymark::definition;
///
/// let definition: Definition<()> = definition! {
///     places: ["draft", "review", "published"],
///     transitions: [
///         "submit": "draft" => "review",
///         "publish": "review" => "published",
///     ]
/// }
/// .unwrap();
///
/// assert_eq!(definition.transitions().len(), 2);
/// ```
#[macro_export]
macro_rules! definition {
    (
        places: [$($place:expr),* $(,)?],
        transitions: [
            $($name:literal : $from:literal => $to:literal),* $(,)?
        ] $(,)?
    ) => {
        $crate::core::Definition::new(
            [$($place),*],
            vec![$($crate::core::Transition::new($name, $from, $to)),*],
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::builder::BuildError;
    use crate::core::Definition;

    #[test]
    fn definition_macro_declares_graph() {
        let definition: Definition<()> = definition! {
            places: ["active", "expired"],
            transitions: [
                "renew": "active" => "active",
                "expire": "active" => "expired",
                "renew": "expired" => "active",
            ]
        }
        .unwrap();

        assert_eq!(definition.places().len(), 2);
        assert_eq!(definition.transitions_named("renew").count(), 2);
        assert_eq!(definition.transitions()[1].name(), "expire");
    }

    #[test]
    fn definition_macro_reports_unknown_places() {
        let result: Result<Definition<()>, _> = definition! {
            places: ["draft"],
            transitions: ["submit": "draft" => "review"]
        };

        assert!(matches!(result, Err(BuildError::UnknownPlace { .. })));
    }

    #[test]
    fn definition_macro_accepts_empty_transitions() {
        let definition: Definition<()> = definition! {
            places: ["only"],
            transitions: [],
        }
        .unwrap();

        assert!(definition.transitions().is_empty());
    }
}
