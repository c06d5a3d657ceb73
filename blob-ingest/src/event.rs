/// A newly created blob, as delivered by the trigger.
#[derive(Debug, Clone, Copy)]
pub struct TriggerEvent<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> TriggerEvent<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}
