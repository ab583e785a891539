/// Response type for the `Module::call` method. Events are recorded on the
/// working set, so the response itself carries nothing yet.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}
