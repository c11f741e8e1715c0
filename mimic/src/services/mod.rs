mod clone;
mod composer;

pub use clone::{
    CloneService, TrainedState, TrainingReport, APOLOGY_RESPONSE, INSUFFICIENT_DATA_RESPONSE,
};
pub use composer::{ResponseComposer, NEGATIVE_EMOJIS, POSITIVE_EMOJIS};
