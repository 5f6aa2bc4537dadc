//! Random human readable names for new apps

use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "agile", "bold", "brave", "calm", "clever", "eager", "fancy", "gentle", "happy", "jolly",
    "keen", "lively", "lucky", "mighty", "nimble", "proud", "quick", "quiet", "rapid", "swift",
    "tidy", "vivid", "witty", "zesty",
];

const NOUNS: &[&str] = &[
    "badger", "comet", "dingo", "falcon", "gecko", "heron", "ibis", "jaguar", "koala", "lemur",
    "lynx", "marmot", "narwhal", "otter", "panda", "quokka", "raven", "salmon", "tapir", "walrus",
    "wildgoat", "yak", "zebra",
];

/// Generate a name like `swift-otter-4821`
pub fn get_unique_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("lucky");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("otter");
    let suffix: u16 = rng.gen_range(0..10_000);
    format!("{}-{}-{:04}", adjective, noun, suffix)
}
