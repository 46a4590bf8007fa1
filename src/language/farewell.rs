use rand::seq::SliceRandom;

const TEMPLATES: [&str; 12] = [
    "Farewell, {}",
    "Adios, {}",
    "R.I.P., {}",
    "We'll miss you, {}",
    "Oh no, not {}!",
    "{} bites the dust",
    "Gone but not forgotten, {}",
    "The end of {} as we know it",
    "Off into the sunset, {}",
    "{}, it's been real",
    "{}, your watch has ended",
    "{} has left the building",
];

/// Flavor text shown when a language is lost
pub trait FarewellText: Send {
    fn farewell(&self, language: &str) -> String;
}

/// Picks one of the fixed farewell templates at random
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomFarewell;

impl FarewellText for RandomFarewell {
    fn farewell(&self, language: &str) -> String {
        let mut rng = rand::thread_rng();
        let template = TEMPLATES.choose(&mut rng).unwrap_or(&TEMPLATES[0]);
        template.replace("{}", language)
    }
}
