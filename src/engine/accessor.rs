//! Reading and writing a subject's current place.

use crate::core::Place;
use std::error::Error;

/// Free-form data threaded through a transition into the state write.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Error produced by a state accessor, propagated unmodified.
pub type AccessorError = Box<dyn Error + Send + Sync>;

/// Knows where a subject keeps its current place.
///
/// The engine never stores subject state itself; every read and write
/// goes through this collaborator.
pub trait StateAccessor<T>: Send + Sync {
    fn get_state(&self, subject: &T) -> Result<Place, AccessorError>;

    fn set_state(&self, subject: &mut T, place: Place, context: &Context)
        -> Result<(), AccessorError>;
}

/// State accessor built from a getter and a setter closure.
pub struct FnStateAccessor<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnStateAccessor<G, S> {
    pub fn new<T>(getter: G, setter: S) -> Self
    where
        G: Fn(&T) -> Result<Place, AccessorError> + Send + Sync,
        S: Fn(&mut T, Place, &Context) -> Result<(), AccessorError> + Send + Sync,
    {
        Self { getter, setter }
    }
}

impl<T, G, S> StateAccessor<T> for FnStateAccessor<G, S>
where
    G: Fn(&T) -> Result<Place, AccessorError> + Send + Sync,
    S: Fn(&mut T, Place, &Context) -> Result<(), AccessorError> + Send + Sync,
{
    fn get_state(&self, subject: &T) -> Result<Place, AccessorError> {
        (self.getter)(subject)
    }

    fn set_state(
        &self,
        subject: &mut T,
        place: Place,
        context: &Context,
    ) -> Result<(), AccessorError> {
        (self.setter)(subject, place, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Invoice {
        status: String,
        note: Option<String>,
    }

    fn accessor() -> impl StateAccessor<Invoice> {
        FnStateAccessor::new(
            |i: &Invoice| Ok(Place::from(i.status.as_str())),
            |i: &mut Invoice, place: Place, context: &Context| {
                i.status = place.to_string();
                i.note = context
                    .get("note")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                Ok(())
            },
        )
    }

    #[test]
    fn reads_and_writes_through_closures() {
        let accessor = accessor();
        let mut invoice = Invoice {
            status: "draft".into(),
            note: None,
        };

        assert_eq!(accessor.get_state(&invoice).unwrap(), "draft");

        let mut context = Context::new();
        context.insert("note".into(), json!("sent by mail"));
        accessor
            .set_state(&mut invoice, Place::from("sent"), &context)
            .unwrap();

        assert_eq!(invoice.status, "sent");
        assert_eq!(invoice.note.as_deref(), Some("sent by mail"));
    }

    #[test]
    fn getter_errors_are_returned() {
        let accessor = FnStateAccessor::new(
            |_: &Invoice| Err("status column is null".into()),
            |_: &mut Invoice, _: Place, _: &Context| Ok(()),
        );
        let invoice = Invoice {
            status: String::new(),
            note: None,
        };

        let error = accessor.get_state(&invoice).unwrap_err();
        assert_eq!(error.to_string(), "status column is null");
    }
}
