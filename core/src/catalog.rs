#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub category: &'static str,
    pub icon: &'static str,
    pub theme: &'static str,
    pub focus: &'static str,
}

const DAILY_LIFE: (&str, &str, &str) = (
    "Daily Life",
    "🌞",
    "collaborative verbs, sequencing, hygiene, routines",
);
const OUTDOORS: (&str, &str, &str) = (
    "Outdoors & Nature",
    "🐚",
    "environment, movement verbs, nature vocabulary",
);
const COMMUNITY: (&str, &str, &str) = (
    "Community & Movement",
    "🚲",
    "community places, collective action, sustainability",
);
const KAI: (&str, &str, &str) = (
    "Kai and Whānau",
    "🍎",
    "gratitude, turn-taking, family and food routines",
);
const FEELINGS: (&str, &str, &str) = (
    "Feelings & Relationships",
    "🧤",
    "emotions, empathy, social connection",
);
const SEASONS: (&str, &str, &str) = (
    "Seasons & Aotearoa Life",
    "🐑",
    "seasonal traditions, Te Ao Māori, whānau connection",
);

const fn entry(group: (&'static str, &'static str, &'static str), theme: &'static str) -> Suggestion {
    Suggestion {
        category: group.0,
        icon: group.1,
        theme,
        focus: group.2,
    }
}

pub const SUGGESTION_CATALOG: &[Suggestion] = &[
    entry(DAILY_LIFE, "Tidying the sandpit together"),
    entry(DAILY_LIFE, "Washing hands before kai time"),
    entry(DAILY_LIFE, "Packing toys away after play"),
    entry(OUTDOORS, "Feeding ducks at the school pond"),
    entry(OUTDOORS, "Planting seeds in the garden bed"),
    entry(OUTDOORS, "Jumping in puddles after the rain"),
    entry(COMMUNITY, "Walking to the library together"),
    entry(COMMUNITY, "Visiting the marae for kapa haka"),
    entry(COMMUNITY, "Taking the recycling to the bins"),
    entry(KAI, "Sharing fruit at morning tea time"),
    entry(KAI, "Baking muffins with mum or dad"),
    entry(KAI, "Saying thank you after kai time"),
    entry(FEELINGS, "Comforting a friend who is sad"),
    entry(FEELINGS, "Saying sorry after bumping someone"),
    entry(FEELINGS, "Waving goodbye to whānau in morning"),
    entry(SEASONS, "Making Matariki stars with our whānau"),
    entry(SEASONS, "Wearing gumboots on a frosty morning"),
    entry(SEASONS, "Collecting leaves in the autumn wind"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

pub const LEVEL_CHOICES: &[Choice] = &[
    Choice {
        value: "ECE",
        label: "Early childhood (ECE)",
    },
    Choice {
        value: "Junior",
        label: "Junior primary",
    },
];

pub const SUBJECT_CHOICES: &[Choice] = &[
    Choice {
        value: "general",
        label: "General",
    },
    Choice {
        value: "math",
        label: "Maths",
    },
];

/// Subjects whose requests carry an extra `activity` field.
pub const SUBJECT_ACTIVITIES: &[(&str, &str)] = &[("math", "name_the_number")];

pub fn activity_for_subject(subject: &str) -> Option<&'static str> {
    SUBJECT_ACTIVITIES
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, activity)| *activity)
}
