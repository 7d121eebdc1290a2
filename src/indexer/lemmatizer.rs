//! Dictionary-backed noun lemmatizer.
//!
//! Plural forms are resolved through an irregular-form table first, then
//! through suffix rules whose candidates are only accepted when the
//! candidate is a known lemma. Words that resolve to nothing pass through.

use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Noun detachment rules: (plural suffix, singular replacement).
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Irregular plurals the suffix rules cannot recover.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("avocadoes", "avocado"),
    ("calves", "calf"),
    ("chilies", "chili"),
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("mangoes", "mango"),
    ("mice", "mouse"),
    ("potatoes", "potato"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("tomatoes", "tomato"),
    ("wives", "wife"),
    ("wolves", "wolf"),
];

/// Base forms known to the lemmatizer.
const CULINARY_LEMMAS: &[&str] = &[
    "almond", "anchovy", "anise", "apple", "apricot", "artichoke", "arugula", "asparagus",
    "aubergine", "avocado", "bacon", "bag", "bagel", "baguette", "banana", "bar", "basil", "batch",
    "bay", "bean", "beef", "beet", "bell", "berry", "biscuit", "blackberry", "block", "blueberry",
    "bone", "bottle", "bouillon", "bowl", "box", "boysenberry", "bratwurst", "bread", "breadstick",
    "breast", "brick", "brisket", "broccoli", "broth", "brownie", "bulb", "bun", "bunch", "bundle",
    "burger", "burrito", "butter", "cabbage", "cake", "candy", "caper", "capsule", "cardamom",
    "carrot", "carton", "cashew", "casserole", "cauliflower", "celery", "chard", "cheddar",
    "cheese", "cherry", "chestnut", "chicken", "chickpea", "chile", "chili", "chip", "chive",
    "chocolate", "chop", "chorizo", "chunk", "ciabatta", "cinnamon", "clam", "clementine", "clove",
    "cob", "coconut", "cod", "container", "cookie", "corn", "courgette", "crab", "cracker",
    "cranberry", "cream", "crepe", "croissant", "crouton", "crumb", "crust", "cube", "cucumber",
    "cup", "cupcake", "currant", "curry", "cutlet", "cutter", "dash", "date", "day", "dill", "dish",
    "dollop", "dough", "doughnut", "dressing", "drop", "drumstick", "duck", "dumpling", "ear",
    "egg", "eggplant", "enchilada", "endive", "envelope", "fennel", "fig", "filet", "fillet",
    "fish", "flake", "flank", "floret", "flour", "frank", "frankfurter", "fry", "gallon",
    "garbanzo", "garlic", "gherkin", "ginger", "glass", "gooseberry", "gram", "granola", "granule",
    "grape", "grapefruit", "green", "groat", "guava", "gumdrop", "halibut", "ham", "hamburger",
    "handful", "hazelnut", "head", "hen", "herb", "herring", "hock", "honey", "hotdog", "hour",
    "huckleberry", "inch", "ingredient", "jalapeno", "jar", "jelly", "jellybean", "jug", "juice",
    "juniper", "kale", "kernel", "ketchup", "kidney", "kilogram", "kiss", "kiwi", "knob", "kumquat",
    "ladle", "lamb", "lasagna", "layer", "lb", "leaf", "leek", "leg", "lemon", "lentil", "lettuce",
    "lime", "link", "liter", "liver", "loaf", "lobster", "loganberry", "loin", "lollipop", "lump",
    "lychee", "macaroon", "mackerel", "mango", "marinade", "marshmallow", "meatball", "melon",
    "meringue", "milk", "milliliter", "mint", "minute", "mixture", "mold", "morsel", "mousse",
    "mozzarella", "muffin", "mug", "mulberry", "mushroom", "mussel", "nacho", "nectarine", "night",
    "noodle", "nugget", "nut", "nutmeg", "oat", "octopus", "oil", "olive", "omelet", "omelette",
    "onion", "orange", "oregano", "ounce", "oyster", "package", "packet", "pad", "paddy", "pan",
    "pancake", "papaya", "parsley", "parsnip", "pasta", "pastry", "pat", "patty", "pea", "peach",
    "peanut", "pear", "pecan", "pellet", "pepper", "peppercorn", "pepperoni", "persimmon", "pickle",
    "pie", "piece", "pimento", "pinch", "pineapple", "pint", "pinto", "pistachio", "pita", "pizza",
    "plantain", "plate", "plum", "pod", "pomegranate", "popsicle", "pork", "portion", "pot",
    "potato", "pound", "prawn", "pretzel", "prune", "pumpkin", "quail", "quart", "quesadilla",
    "quince", "rack", "radicchio", "radish", "raisin", "ramekin", "rasher", "raspberry", "ravioli",
    "recipe", "rhubarb", "rib", "rice", "rind", "ring", "roll", "rosemary", "round", "rump",
    "sachet", "sage", "salad", "salmon", "salt", "sandwich", "sardine", "sauce", "sausage",
    "scallion", "scallop", "scone", "scoop", "seasoning", "second", "seed", "serrano", "serving",
    "shake", "shallot", "shank", "sheet", "shell", "shoulder", "shrimp", "sirloin", "skewer",
    "slab", "slice", "sliver", "snap", "snow", "soup", "soybean", "sparerib", "spear", "spice",
    "spinach", "spoonful", "sprig", "sprinkle", "sprout", "spud", "square", "squash", "squid",
    "stalk", "star", "steak", "stem", "stew", "stick", "strand", "strawberry", "strip", "sugar",
    "sultana", "sweet", "tablespoon", "tablet", "taco", "tangerine", "tart", "teaspoon",
    "tenderloin", "thigh", "thyme", "tin", "toast", "tofu", "tomatillo", "tomato", "topping",
    "tortilla", "tray", "trout", "truffle", "tub", "tube", "tuber", "tuna", "turkey", "turnip",
    "vanilla", "vegetable", "wafer", "waffle", "walnut", "wedge", "weed", "week", "wheat",
    "whisker", "white", "wiener", "wing", "wrap", "yam", "yogurt", "yolk", "zest", "zucchini",
];

/// Noun lemmatizer with a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
    vocabulary: HashSet<String>,
}

impl Lemmatizer {
    /// Lemmatizer over the compiled-in culinary vocabulary
    pub fn new() -> Self {
        let irregular = IRREGULAR_NOUNS
            .iter()
            .map(|(plural, lemma)| (plural.to_string(), lemma.to_string()))
            .collect();

        let mut vocabulary: HashSet<String> =
            CULINARY_LEMMAS.iter().map(|w| w.to_string()).collect();
        vocabulary.extend(IRREGULAR_NOUNS.iter().map(|(_, lemma)| lemma.to_string()));

        Self {
            irregular,
            vocabulary,
        }
    }

    /// Add lemmas to the vocabulary. Blank entries are ignored.
    pub fn with_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for lemma in lemmas {
            let lemma = lemma.as_ref().trim().to_lowercase();
            if !lemma.is_empty() {
                self.vocabulary.insert(lemma);
            }
        }
        self
    }

    /// Extend the vocabulary from a newline-separated word list
    pub fn with_lemma_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let before = self.vocabulary.len();
        let lemmatizer = self.with_lemmas(content.lines());
        info!(
            "Loaded {} additional lemmas from {:?}",
            lemmatizer.vocabulary.len() - before,
            path
        );
        Ok(lemmatizer)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Reduce a lowercase word to its singular noun form.
    ///
    /// Among the word itself (if known) and every rule candidate that is a
    /// known lemma, the shortest wins; ties keep the earliest candidate.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return lemma.clone();
        }

        let mut best: Option<String> = None;
        let mut consider = |candidate: String| {
            if self.vocabulary.contains(&candidate)
                && best.as_ref().map_or(true, |b| candidate.len() < b.len())
            {
                best = Some(candidate);
            }
        };

        consider(word.to_string());
        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if !stem.is_empty() {
                    consider(format!("{stem}{replacement}"));
                }
            }
        }

        best.unwrap_or_else(|| word.to_string())
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}
