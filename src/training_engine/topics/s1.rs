use crate::training_engine::models::{Paper, StatTopic, TopicConfig};

pub static TOPICS: [TopicConfig; 5] = [
    TopicConfig {
        id: StatTopic::DataRepresentation,
        paper: Paper::S1,
        icon: "📊",
        description: "Stem-and-leaf, box-and-whisker, histograms, and standard deviation.",
        syllabus_objectives: &[
            "Calculation of Mean/Variance",
            "Standard Deviation",
            "Coding",
            "Box-and-whisker plots",
            "Cumulative frequency",
        ],
    },
    TopicConfig {
        id: StatTopic::PermutationsCombinations,
        paper: Paper::S1,
        icon: "🧩",
        description: "Arrangements, selections, and circular permutations with constraints.",
        syllabus_objectives: &[
            "Factorial notation",
            "Permutations (nPr)",
            "Combinations (nCr)",
            "Restrictions on arrangements",
            "Selections from multiple groups",
        ],
    },
    TopicConfig {
        id: StatTopic::Probability,
        paper: Paper::S1,
        icon: "🎲",
        description: "Conditional probability, independent events, and Venn diagrams.",
        syllabus_objectives: &[
            "Addition/Multiplication rules",
            "Mutually exclusive events",
            "Independent events",
            "Conditional Probability P(A|B)",
            "Tree diagrams",
        ],
    },
    TopicConfig {
        id: StatTopic::DiscreteVariables,
        paper: Paper::S1,
        icon: "🔢",
        description: "Expected value E(X), Variance Var(X), and the Binomial Distribution.",
        syllabus_objectives: &[
            "Probability distribution tables",
            "E(X) and Var(X)",
            "Binomial Distribution properties",
            "Binomial formula application",
        ],
    },
    TopicConfig {
        id: StatTopic::NormalDistribution,
        paper: Paper::S1,
        icon: "📉",
        description: "Standardization, inverse normal lookup, and continuity corrections.",
        syllabus_objectives: &[
            "Standard Normal Z",
            "Standardization formula",
            "Finding probabilities",
            "Inverse normal lookup",
            "Continuity correction for Binomial approximation",
        ],
    },
];
