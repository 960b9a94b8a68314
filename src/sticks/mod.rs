pub(crate) mod geometry;
pub(crate) mod kind;
pub(crate) mod layout;
pub(crate) mod percentage;
pub(crate) mod sequencer;
pub(crate) mod stick;
pub(crate) mod variant;
