//! Static phrase tables

/// Placeholder for the name a phrase is aimed at
pub const NAME_PLACEHOLDER: &str = "{nick}";

/// Actions performed by `attack`
pub const ATTACKS: &[&str] = &[
    "slaps {nick} around a bit with a large trout",
    "throws a rubber chicken at {nick}",
    "pokes {nick} with a sharp stick",
    "drops an anvil on {nick}",
    "bonks {nick} on the head with a frying pan",
    "challenges {nick} to a duel",
];

/// Actions sent when someone joins the channel
pub const GREETINGS: &[&str] = &[
    "waves at {nick}",
    "welcomes {nick} to the channel!",
    "bows respectfully to {nick}",
    "says hello to",
    "hugs",
];

/// Fill `template` with `name`, or append it when there is no placeholder
pub fn fill(template: &str, name: &str) -> String {
    if template.contains(NAME_PLACEHOLDER) {
        template.replace(NAME_PLACEHOLDER, name)
    } else {
        format!("{} {}", template, name)
    }
}

/// Uniformly random entry from `table`, filled with `name`
pub fn pick(table: &[&str], name: &str) -> String {
    use rand::seq::SliceRandom;

    table
        .choose(&mut rand::thread_rng())
        .map(|template| fill(template, name))
        .unwrap_or_else(|| name.to_string())
}
