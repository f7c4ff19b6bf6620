use crate::models::{Chapter, ClassLevel, Subject, Topic};

pub struct SubjectTopics {
    pub subject: Subject,
    pub topics: &'static [&'static str],
}

pub struct ClassSyllabus {
    pub class: ClassLevel,
    pub subjects: &'static [SubjectTopics],
}

const SCIENCE_9: &[&str] = &[
    "Matter in Our Surroundings",
    "Is Matter Around Us Pure",
    "Atoms and Molecules",
    "Structure of the Atom",
    "The Fundamental Unit of Life",
    "Tissues",
    "Motion",
    "Force and Laws of Motion",
    "Gravitation",
    "Work and Energy",
    "Sound",
    "Improvement in Food Resources",
];

const MATHEMATICS_9: &[&str] = &[
    "Number Systems",
    "Polynomials",
    "Coordinate Geometry",
    "Linear Equations in Two Variables",
    "Introduction to Euclid's Geometry",
    "Lines and Angles",
    "Triangles",
    "Quadrilaterals",
    "Circles",
    "Heron's Formula",
    "Surface Areas and Volumes",
    "Statistics",
];

const SOCIAL_SCIENCE_9: &[&str] = &[
    "The French Revolution",
    "Socialism in Europe and the Russian Revolution",
    "India - Size and Location",
    "Physical Features of India",
    "What is Democracy? Why Democracy?",
    "Constitutional Design",
    "The Story of Village Palampur",
    "People as Resource",
];

const ENGLISH_9: &[&str] = &[
    "The Fun They Had",
    "The Sound of Music",
    "The Little Girl",
    "The Road Not Taken",
    "Wind",
    "Rain on the Roof",
];

const SCIENCE_10: &[&str] = &[
    "Chemical Reactions and Equations",
    "Acids, Bases and Salts",
    "Metals and Non-metals",
    "Carbon and its Compounds",
    "Life Processes",
    "Control and Coordination",
    "How do Organisms Reproduce?",
    "Heredity",
    "Light - Reflection and Refraction",
    "The Human Eye and the Colourful World",
    "Electricity",
    "Magnetic Effects of Electric Current",
    "Our Environment",
];

const MATHEMATICS_10: &[&str] = &[
    "Real Numbers",
    "Polynomials",
    "Pair of Linear Equations in Two Variables",
    "Quadratic Equations",
    "Arithmetic Progressions",
    "Triangles",
    "Coordinate Geometry",
    "Introduction to Trigonometry",
    "Some Applications of Trigonometry",
    "Circles",
    "Areas Related to Circles",
    "Surface Areas and Volumes",
    "Statistics",
    "Probability",
];

const SOCIAL_SCIENCE_10: &[&str] = &[
    "The Rise of Nationalism in Europe",
    "Nationalism in India",
    "The Making of a Global World",
    "Resources and Development",
    "Water Resources",
    "Agriculture",
    "Power Sharing",
    "Federalism",
    "Development",
    "Money and Credit",
];

const ENGLISH_10: &[&str] = &[
    "A Letter to God",
    "Nelson Mandela: Long Walk to Freedom",
    "Two Stories about Flying",
    "From the Diary of Anne Frank",
    "Dust of Snow",
    "Fire and Ice",
];

const PHYSICS_11: &[&str] = &[
    "Units and Measurements",
    "Motion in a Straight Line",
    "Motion in a Plane",
    "Laws of Motion",
    "Work, Energy and Power",
    "System of Particles and Rotational Motion",
    "Gravitation",
    "Mechanical Properties of Solids",
    "Mechanical Properties of Fluids",
    "Thermal Properties of Matter",
    "Thermodynamics",
    "Kinetic Theory",
    "Oscillations",
    "Waves",
];

const CHEMISTRY_11: &[&str] = &[
    "Some Basic Concepts of Chemistry",
    "Structure of Atom",
    "Classification of Elements and Periodicity in Properties",
    "Chemical Bonding and Molecular Structure",
    "Thermodynamics",
    "Equilibrium",
    "Redox Reactions",
    "Organic Chemistry - Some Basic Principles and Techniques",
    "Hydrocarbons",
];

const MATHEMATICS_11: &[&str] = &[
    "Sets",
    "Relations and Functions",
    "Trigonometric Functions",
    "Complex Numbers and Quadratic Equations",
    "Linear Inequalities",
    "Permutations and Combinations",
    "Binomial Theorem",
    "Sequences and Series",
    "Straight Lines",
    "Conic Sections",
    "Introduction to Three Dimensional Geometry",
    "Limits and Derivatives",
    "Statistics",
    "Probability",
];

const BIOLOGY_11: &[&str] = &[
    "The Living World",
    "Biological Classification",
    "Plant Kingdom",
    "Animal Kingdom",
    "Cell: The Unit of Life",
    "Biomolecules",
    "Cell Cycle and Cell Division",
    "Photosynthesis in Higher Plants",
    "Respiration in Plants",
    "Breathing and Exchange of Gases",
    "Body Fluids and Circulation",
    "Neural Control and Coordination",
];

const ENGLISH_11: &[&str] = &[
    "The Portrait of a Lady",
    "We're Not Afraid to Die",
    "Discovering Tut: the Saga Continues",
    "The Ailing Planet: the Green Movement's Role",
    "A Photograph",
    "The Voice of the Rain",
];

const PHYSICS_12: &[&str] = &[
    "Electric Charges and Fields",
    "Electrostatic Potential and Capacitance",
    "Current Electricity",
    "Moving Charges and Magnetism",
    "Magnetism and Matter",
    "Electromagnetic Induction",
    "Alternating Current",
    "Electromagnetic Waves",
    "Ray Optics and Optical Instruments",
    "Wave Optics",
    "Dual Nature of Radiation and Matter",
    "Atoms",
    "Nuclei",
    "Semiconductor Electronics",
];

const CHEMISTRY_12: &[&str] = &[
    "Solutions",
    "Electrochemistry",
    "Chemical Kinetics",
    "The d- and f-Block Elements",
    "Coordination Compounds",
    "Haloalkanes and Haloarenes",
    "Alcohols, Phenols and Ethers",
    "Aldehydes, Ketones and Carboxylic Acids",
    "Amines",
    "Biomolecules",
];

const MATHEMATICS_12: &[&str] = &[
    "Relations and Functions",
    "Inverse Trigonometric Functions",
    "Matrices",
    "Determinants",
    "Continuity and Differentiability",
    "Application of Derivatives",
    "Integrals",
    "Application of Integrals",
    "Differential Equations",
    "Vector Algebra",
    "Three Dimensional Geometry",
    "Linear Programming",
    "Probability",
];

const BIOLOGY_12: &[&str] = &[
    "Sexual Reproduction in Flowering Plants",
    "Human Reproduction",
    "Reproductive Health",
    "Principles of Inheritance and Variation",
    "Molecular Basis of Inheritance",
    "Evolution",
    "Human Health and Disease",
    "Microbes in Human Welfare",
    "Biotechnology: Principles and Processes",
    "Biotechnology and its Applications",
    "Organisms and Populations",
    "Ecosystem",
    "Biodiversity and Conservation",
];

const ENGLISH_12: &[&str] = &[
    "The Last Lesson",
    "Lost Spring",
    "Deep Water",
    "The Rattrap",
    "Indigo",
    "My Mother at Sixty-six",
    "Keeping Quiet",
];

pub const CATALOG: &[ClassSyllabus] = &[
    ClassSyllabus {
        class: ClassLevel::Ninth,
        subjects: &[
            SubjectTopics { subject: Subject::Science, topics: SCIENCE_9 },
            SubjectTopics { subject: Subject::Mathematics, topics: MATHEMATICS_9 },
            SubjectTopics { subject: Subject::SocialScience, topics: SOCIAL_SCIENCE_9 },
            SubjectTopics { subject: Subject::English, topics: ENGLISH_9 },
        ],
    },
    ClassSyllabus {
        class: ClassLevel::Tenth,
        subjects: &[
            SubjectTopics { subject: Subject::Science, topics: SCIENCE_10 },
            SubjectTopics { subject: Subject::Mathematics, topics: MATHEMATICS_10 },
            SubjectTopics { subject: Subject::SocialScience, topics: SOCIAL_SCIENCE_10 },
            SubjectTopics { subject: Subject::English, topics: ENGLISH_10 },
        ],
    },
    ClassSyllabus {
        class: ClassLevel::Eleventh,
        subjects: &[
            SubjectTopics { subject: Subject::Physics, topics: PHYSICS_11 },
            SubjectTopics { subject: Subject::Chemistry, topics: CHEMISTRY_11 },
            SubjectTopics { subject: Subject::Mathematics, topics: MATHEMATICS_11 },
            SubjectTopics { subject: Subject::Biology, topics: BIOLOGY_11 },
            SubjectTopics { subject: Subject::English, topics: ENGLISH_11 },
        ],
    },
    ClassSyllabus {
        class: ClassLevel::Twelfth,
        subjects: &[
            SubjectTopics { subject: Subject::Physics, topics: PHYSICS_12 },
            SubjectTopics { subject: Subject::Chemistry, topics: CHEMISTRY_12 },
            SubjectTopics { subject: Subject::Mathematics, topics: MATHEMATICS_12 },
            SubjectTopics { subject: Subject::Biology, topics: BIOLOGY_12 },
            SubjectTopics { subject: Subject::English, topics: ENGLISH_12 },
        ],
    },
];

/// Subjects offered for a class, in catalog order.
pub fn subjects_for(class: ClassLevel) -> Vec<Subject> {
    CATALOG
        .iter()
        .find(|c| c.class == class)
        .map(|c| c.subjects.iter().map(|s| s.subject).collect())
        .unwrap_or_default()
}

pub fn topics_for(class: ClassLevel, subject: Subject) -> &'static [&'static str] {
    CATALOG
        .iter()
        .find(|c| c.class == class)
        .and_then(|c| c.subjects.iter().find(|s| s.subject == subject))
        .map(|s| s.topics)
        .unwrap_or(&[])
}

/// Drops repeated subjects, keeping the first occurrence of each.
pub fn unique_subjects(subjects: &[Subject]) -> Vec<Subject> {
    let mut unique = Vec::with_capacity(subjects.len());
    for &subject in subjects {
        if !unique.contains(&subject) {
            unique.push(subject);
        }
    }
    unique
}

/// Builds a fresh syllabus for onboarding: one chapter per distinct selected
/// subject, every topic locked except the first.
pub fn build_syllabus(class: ClassLevel, subjects: &[Subject]) -> Vec<Chapter> {
    let mut chapters = Vec::new();

    for subject in unique_subjects(subjects) {
        let titles = topics_for(class, subject);
        if titles.is_empty() {
            log::warn!("No catalog topics for {} in class {}", subject, class);
            continue;
        }

        let slug = subject_slug(subject);
        let topics = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Topic::new(format!("topic-{}-{}", slug, i), *title, i == 0))
            .collect();

        chapters.push(Chapter {
            id: format!("ch-{}-{}", class, slug),
            subject,
            title: format!("{} Foundation", subject),
            topics,
        });
    }

    chapters
}

fn subject_slug(subject: Subject) -> String {
    subject.as_str().to_ascii_lowercase().replace(' ', "-")
}
