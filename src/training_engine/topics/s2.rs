use crate::training_engine::models::{Paper, StatTopic, TopicConfig};

pub static TOPICS: [TopicConfig; 5] = [
    TopicConfig {
        id: StatTopic::PoissonDistribution,
        paper: Paper::S2,
        icon: "⏱️",
        description: "Modeling rare events and the Poisson approximation to the Binomial.",
        syllabus_objectives: &[
            "Poisson properties",
            "E(X)=Var(X)=λ",
            "Sums of independent Poisson RVs",
            "Poisson approximation to Binomial",
        ],
    },
    TopicConfig {
        id: StatTopic::LinearCombinations,
        paper: Paper::S2,
        icon: "🔗",
        description: "Expectation and Variance of E(aX + bY) for independent variables.",
        syllabus_objectives: &[
            "Expectation of linear combinations",
            "Variance of linear combinations",
            "Sum of independent Normal variables",
            "Difference of means",
        ],
    },
    TopicConfig {
        id: StatTopic::ContinuousVariables,
        paper: Paper::S2,
        icon: "♾️",
        description: "Probability Density Functions (PDF) and Cumulative Distribution (CDF).",
        syllabus_objectives: &[
            "PDF properties",
            "Calculating probabilities via integration",
            "Finding E(X) and Var(X) from PDF",
            "Mode and Median",
            "Finding CDF from PDF",
        ],
    },
    TopicConfig {
        id: StatTopic::SamplingEstimation,
        paper: Paper::S2,
        icon: "🏗️",
        description: "Central Limit Theorem, unbiased estimators, and Confidence Intervals.",
        syllabus_objectives: &[
            "Unbiased estimates of mean/variance",
            "Central Limit Theorem (CLT)",
            "Confidence Intervals for mean",
            "Width of intervals",
        ],
    },
    TopicConfig {
        id: StatTopic::HypothesisTesting,
        paper: Paper::S2,
        icon: "⚖️",
        description: "Type I and Type II errors, and tests for population means and proportions.",
        syllabus_objectives: &[
            "Null and Alternative hypotheses",
            "Significance levels",
            "Critical values vs p-values",
            "Type I and Type II errors",
            "Tests for Normal mean",
            "Tests for Poisson mean",
        ],
    },
];
