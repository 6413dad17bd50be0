//! Error-page character card: one portrait with a matching title and message,
//! picked at random on every page load.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Character {
    pub image: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

pub const CHARACTERS: &[Character] = &[
    Character {
        image: "assets/images/Error-Img/BeHel'Mor - Gluttony.png",
        name: "BeHel'Mor",
        title: "Consumed by the Void",
        message: "Gluttony devours all paths... including this one.",
    },
    Character {
        image: "assets/images/Error-Img/Galahad - Redemption.png",
        name: "Galahad",
        title: "Redemption Denied",
        message: "The path to salvation does not lead here, seeker.",
    },
    Character {
        image: "assets/images/Error-Img/Lancelot - Honor.png",
        name: "Lancelot",
        title: "Honor Misguided",
        message: "Even the most valiant knight can lose their way.",
    },
    Character {
        image: "assets/images/Error-Img/Mane - Pride.png",
        name: "Mane",
        title: "Pride Before the Fall",
        message: "Your pride led you astray. This realm exists not.",
    },
    Character {
        image: "assets/images/Error-Img/The Architect.png",
        name: "The Architect",
        title: "Unwritten Blueprint",
        message: "This page was never designed. Return to the plans.",
    },
    Character {
        image: "assets/images/Error-Img/The Seeker.png",
        name: "The Seeker",
        title: "Quest Unfulfilled",
        message: "What you seek lies elsewhere, wanderer.",
    },
    Character {
        image: "assets/images/Error-Img/Void.png",
        name: "The Void",
        title: "The Void Answers",
        message: "You have gazed into nothingness... and found it.",
    },
    Character {
        image: "assets/images/Error-Img/Watcher.png",
        name: "The Watcher",
        title: "Observed and Lost",
        message: "The Watcher sees all... except this page.",
    },
    Character {
        image: "assets/images/Error-Img/Crest.png",
        name: "Oathbreaker Crest",
        title: "Oath Unfulfilled",
        message: "The seal remains, but the path is broken.",
    },
    Character {
        image: "assets/images/Error-Img/comunity.png",
        name: "Lost Community",
        title: "Wanderers United",
        message: "Even together, we cannot find what does not exist.",
    },
];

/// Uniform pick over [`CHARACTERS`].
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static Character {
    &CHARACTERS[rng.gen_range(0..CHARACTERS.len())]
}

/// Image URL with a `?t=` timestamp so the browser refetches on every visit.
pub fn cache_busted(image: &str, now_ms: f64) -> String {
    format!("{image}?t={}", now_ms.max(0.0) as u64)
}
