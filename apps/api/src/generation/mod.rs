// Review generation: profile tables, prompt assembly, and the model
// fallback loop. All provider calls go through the `provider` module —
// no direct API calls here.

pub mod generator;
pub mod profiles;
pub mod prompts;
