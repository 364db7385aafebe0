use crate::model::LearningStyle;

/// Multiple-choice recall question; `correct` indexes into `options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecallQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

impl RecallQuestion {
    #[must_use]
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }
}

/// Study material for one topic in one style, plus its recall test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningModule {
    pub id: &'static str,
    pub style: LearningStyle,
    pub title: &'static str,
    pub summary: &'static str,
    pub questions: &'static [RecallQuestion],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub modules: &'static [LearningModule],
}

impl Topic {
    #[must_use]
    pub fn module(&self, style: LearningStyle) -> Option<&'static LearningModule> {
        self.modules.iter().find(|module| module.style == style)
    }
}

const fn question(
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
) -> RecallQuestion {
    RecallQuestion {
        id,
        prompt,
        options,
        correct,
    }
}

static MARINE_VISUAL: [RecallQuestion; 3] = [
    question(
        "q1",
        "What percentage of deep-sea creatures produce bioluminescent light?",
        ["50%", "70%", "90%", "100%"],
        2,
    ),
    question(
        "q2",
        "Which zone has the most bioluminescent activity?",
        ["Twilight Zone", "Midnight Zone", "Abyssal Zone", "Surface Zone"],
        1,
    ),
    question(
        "q3",
        "What is the main chemical involved in bioluminescence?",
        ["Chlorophyll", "Luciferin", "Melanin", "Keratin"],
        1,
    ),
];

static MARINE_AUDITORY: [RecallQuestion; 3] = [
    question(
        "q1",
        "What is the efficiency of bioluminescent light production?",
        ["50%", "75%", "90%", "100%"],
        3,
    ),
    question(
        "q2",
        "What is the deep ocean compared to in the audio?",
        ["A light show", "A living constellation", "A disco", "A firework display"],
        1,
    ),
    question(
        "q3",
        "At what depth does the twilight zone begin?",
        ["100m", "200m", "300m", "500m"],
        1,
    ),
];

static MARINE_READING: [RecallQuestion; 3] = [
    question(
        "q1",
        "What is the enzyme that catalyzes the bioluminescent reaction?",
        ["Luciferin", "Luciferase", "Luminase", "Biolucin"],
        1,
    ),
    question(
        "q2",
        "Which zone has peak bioluminescent activity?",
        ["Epipelagic", "Mesopelagic", "Bathypelagic", "Abyssopelagic"],
        2,
    ),
    question(
        "q3",
        "What is the Atolla Jellyfish's \"burglar alarm\"?",
        ["A loud sound", "A spinning ring of light", "Chemical release", "Rapid movement"],
        1,
    ),
];

static MARINE_KINESTHETIC: [RecallQuestion; 3] = [
    question(
        "q1",
        "In which zone would you find the most counter-illumination?",
        ["Twilight Zone", "Midnight Zone", "Abyssal Zone", "Surface Zone"],
        0,
    ),
    question(
        "q2",
        "Which creature uses a lure to attract prey?",
        ["Crystal Jelly", "Hatchetfish", "Anglerfish", "Lanternfish"],
        2,
    ),
    question(
        "q3",
        "What zone has the most bioluminescent activity?",
        ["Twilight Zone", "Midnight Zone", "Abyssal Zone", "All zones equally"],
        1,
    ),
];

static MARINE_MODULES: [LearningModule; 4] = [
    LearningModule {
        id: "visual_marine",
        style: LearningStyle::Visual,
        title: "Visual Learning: Marine Bioluminescence",
        summary: "Diagrams of the ocean depth zones and the luciferin-luciferase reaction. \
                  90% of deep-sea creatures produce light, used for communication, hunting and defense.",
        questions: &MARINE_VISUAL,
    },
    LearningModule {
        id: "auditory_marine",
        style: LearningStyle::Auditory,
        title: "Auditory Learning: Marine Bioluminescence",
        summary: "A narrated descent into the deep ocean. Bioluminescence is cold light with \
                  near 100% efficiency; the dark depths glow like a living constellation.",
        questions: &MARINE_AUDITORY,
    },
    LearningModule {
        id: "reading_marine",
        style: LearningStyle::Reading,
        title: "Reading/Writing: Marine Bioluminescence",
        summary: "A written study of the chemistry (luciferin oxidized by luciferase), ecological \
                  functions, distribution by ocean zone and notable species such as the Atolla jellyfish.",
        questions: &MARINE_READING,
    },
    LearningModule {
        id: "kinesthetic_marine",
        style: LearningStyle::Kinesthetic,
        title: "Kinesthetic Learning: Marine Bioluminescence",
        summary: "Sort anglerfish, lanternfish, hatchetfish and jellies into their ocean zones \
                  and explore how each one uses its light.",
        questions: &MARINE_KINESTHETIC,
    },
];

static TOPICS: [Topic; 1] = [Topic {
    id: "marine_bioluminescence",
    name: "Marine Bioluminescence",
    description: "The science behind light-producing organisms in the ocean",
    modules: &MARINE_MODULES,
}];

/// All authored topics.
#[must_use]
pub fn topics() -> &'static [Topic] {
    &TOPICS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_covers_all_styles() {
        for topic in topics() {
            for style in LearningStyle::ALL {
                let module = topic.module(style).unwrap();
                assert_eq!(module.style, style);
                assert!(!module.questions.is_empty());
            }
        }
    }

    #[test]
    fn answer_keys_point_at_real_options() {
        for topic in topics() {
            for module in topic.modules {
                for q in module.questions {
                    assert!(q.correct < q.options.len(), "{}/{}", module.id, q.id);
                }
            }
        }
    }
}
