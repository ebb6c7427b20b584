//! Macro lookup for named foods and the meal templates behind each diet style.

use crate::models::profile::DietStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodMacros {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
}

const fn food(calories: i32, protein: i32, carbs: i32, fat: i32, fiber: i32) -> FoodMacros {
    FoodMacros {
        calories,
        protein,
        carbs,
        fat,
        fiber,
    }
}

/// Per-serving macros, keyed by lowercase name.
pub static FOOD_MACROS: &[(&str, FoodMacros)] = &[
    ("grilled chicken breast", food(165, 31, 0, 4, 0)),
    ("salmon fillet", food(208, 20, 0, 13, 0)),
    ("canned tuna", food(132, 29, 0, 1, 0)),
    ("hard-boiled eggs", food(155, 13, 1, 11, 0)),
    ("greek yogurt", food(100, 17, 6, 1, 0)),
    ("cottage cheese", food(206, 28, 8, 9, 0)),
    ("tofu", food(144, 17, 3, 9, 2)),
    ("tempeh", food(195, 20, 8, 11, 5)),
    ("protein shake", food(120, 24, 3, 1, 1)),
    ("lentils", food(230, 18, 40, 1, 16)),
    ("chickpeas", food(269, 15, 45, 4, 12)),
    ("brown rice", food(216, 5, 45, 2, 4)),
    ("quinoa", food(222, 8, 39, 4, 5)),
    ("oatmeal", food(150, 5, 27, 3, 4)),
    ("sweet potato", food(112, 2, 26, 0, 4)),
    ("whole grain toast", food(80, 4, 14, 1, 2)),
    ("banana", food(105, 1, 27, 0, 3)),
    ("apple", food(95, 0, 25, 0, 4)),
    ("blueberries", food(85, 1, 21, 0, 4)),
    ("avocado", food(240, 3, 12, 22, 10)),
    ("almonds", food(164, 6, 6, 14, 4)),
    ("peanut butter", food(190, 7, 7, 16, 2)),
    ("hummus", food(166, 8, 14, 10, 6)),
    ("dark chocolate", food(170, 2, 13, 12, 3)),
];

/// Profile assigned to foods missing from the table.
pub const UNKNOWN_FOOD: FoodMacros = food(220, 12, 20, 8, 3);

pub fn lookup_food(name: &str) -> FoodMacros {
    let key = name.trim().to_lowercase();
    FOOD_MACROS
        .iter()
        .find(|(food, _)| *food == key)
        .map(|(_, macros)| *macros)
        .unwrap_or(UNKNOWN_FOOD)
}

#[derive(Debug)]
pub struct MealTemplate {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub preparation: &'static str,
}

#[derive(Debug)]
pub struct DietMenu {
    pub breakfast: MealTemplate,
    pub lunch: MealTemplate,
    pub dinner: MealTemplate,
    pub snacks: [MealTemplate; 2],
    pub supplements: &'static [&'static str],
    pub guidance: &'static [&'static str],
}

const fn meal(
    name: &'static str,
    ingredients: &'static [&'static str],
    preparation: &'static str,
) -> MealTemplate {
    MealTemplate {
        name,
        ingredients,
        preparation,
    }
}

static OMNIVORE: DietMenu = DietMenu {
    breakfast: meal(
        "Protein Oats with Berries",
        &["rolled oats", "whey protein", "blueberries", "milk", "chia seeds"],
        "Simmer oats in milk, stir in protein off the heat, top with berries and chia.",
    ),
    lunch: meal(
        "Chicken Grain Bowl",
        &["grilled chicken breast", "brown rice", "roasted vegetables", "tahini"],
        "Batch-cook rice and chicken; assemble with vegetables and a tahini drizzle.",
    ),
    dinner: meal(
        "Salmon with Sweet Potato and Greens",
        &["salmon fillet", "sweet potato", "broccoli", "olive oil", "lemon"],
        "Roast salmon and sweet potato at 200C for 15 minutes; steam broccoli.",
    ),
    snacks: [
        meal("Greek Yogurt and Almonds", &["greek yogurt", "almonds", "honey"], "Mix and serve cold."),
        meal("Apple with Peanut Butter", &["apple", "peanut butter"], "Slice and dip."),
    ],
    supplements: &["Vitamin D3 (2000 IU)", "Creatine monohydrate (3-5 g)", "Omega-3 fish oil"],
    guidance: &[
        "Anchor every meal with a palm-sized protein portion.",
        "Fill half the plate with vegetables at lunch and dinner.",
    ],
};

static VEGETARIAN: DietMenu = DietMenu {
    breakfast: meal(
        "Veggie Egg Scramble",
        &["eggs", "spinach", "feta", "whole grain toast"],
        "Scramble eggs with wilted spinach, finish with feta; serve with toast.",
    ),
    lunch: meal(
        "Lentil and Halloumi Salad",
        &["lentils", "halloumi", "cucumber", "cherry tomatoes", "olive oil"],
        "Grill halloumi slices and toss with lentils and chopped vegetables.",
    ),
    dinner: meal(
        "Paneer Tikka with Quinoa",
        &["paneer", "greek yogurt", "quinoa", "bell peppers", "tikka spices"],
        "Marinate paneer in spiced yogurt, grill with peppers, serve over quinoa.",
    ),
    snacks: [
        meal("Cottage Cheese and Pineapple", &["cottage cheese", "pineapple"], "Serve chilled."),
        meal("Hummus and Veggie Sticks", &["hummus", "carrots", "celery"], "Slice vegetables and dip."),
    ],
    supplements: &["Vitamin B12", "Vitamin D3 (2000 IU)", "Creatine monohydrate (3-5 g)"],
    guidance: &[
        "Combine legumes with grains or dairy to round out amino acids.",
        "Eggs and dairy are your easiest protein wins; use them daily.",
    ],
};

static VEGAN: DietMenu = DietMenu {
    breakfast: meal(
        "Tofu Scramble Wrap",
        &["tofu", "black beans", "whole wheat tortilla", "salsa", "nutritional yeast"],
        "Crumble and sear tofu with spices, wrap with beans and salsa.",
    ),
    lunch: meal(
        "Tempeh Buddha Bowl",
        &["tempeh", "quinoa", "kale", "edamame", "peanut sauce"],
        "Pan-fry tempeh strips; layer over quinoa, kale and edamame.",
    ),
    dinner: meal(
        "Chickpea and Spinach Curry",
        &["chickpeas", "spinach", "coconut milk", "brown rice", "curry paste"],
        "Simmer chickpeas in curry and coconut milk, fold in spinach, serve over rice.",
    ),
    snacks: [
        meal("Soy Yogurt with Granola", &["soy yogurt", "granola", "hemp seeds"], "Layer in a jar."),
        meal("Roasted Chickpeas", &["chickpeas", "smoked paprika", "olive oil"], "Roast at 200C for 25 minutes."),
    ],
    supplements: &["Vitamin B12", "Algae-based omega-3", "Vitamin D3 (vegan)", "Iron (if ferritin is low)"],
    guidance: &[
        "Aim for a soy, seitan or legume protein at every meal.",
        "Pair iron-rich foods with vitamin C for absorption.",
    ],
};

static PESCATARIAN: DietMenu = DietMenu {
    breakfast: meal(
        "Smoked Salmon Bagel",
        &["whole grain bagel", "smoked salmon", "cream cheese", "capers"],
        "Toast the bagel and layer with cream cheese, salmon and capers.",
    ),
    lunch: meal(
        "Tuna Nicoise Salad",
        &["canned tuna", "green beans", "new potatoes", "hard-boiled eggs", "olives"],
        "Boil potatoes and beans, then toss with tuna, eggs and olives.",
    ),
    dinner: meal(
        "Shrimp Stir-Fry with Rice Noodles",
        &["shrimp", "rice noodles", "bok choy", "ginger", "soy sauce"],
        "Stir-fry shrimp and vegetables on high heat; toss through noodles.",
    ),
    snacks: [
        meal("Edamame with Sea Salt", &["edamame", "sea salt"], "Steam for 5 minutes."),
        meal("Greek Yogurt with Walnuts", &["greek yogurt", "walnuts"], "Mix and serve."),
    ],
    supplements: &["Vitamin D3 (2000 IU)", "Creatine monohydrate (3-5 g)"],
    guidance: &[
        "Eat oily fish two to three times per week for omega-3s.",
        "Rotate seafood choices to keep mercury exposure low.",
    ],
};

static KETO: DietMenu = DietMenu {
    breakfast: meal(
        "Avocado and Egg Skillet",
        &["eggs", "avocado", "spinach", "cheddar"],
        "Bake eggs over sauteed spinach, top with cheddar and avocado.",
    ),
    lunch: meal(
        "Cobb Salad",
        &["grilled chicken breast", "bacon", "avocado", "blue cheese", "romaine"],
        "Chop and arrange; dress with olive oil and vinegar.",
    ),
    dinner: meal(
        "Ribeye with Garlic Butter Broccoli",
        &["ribeye steak", "broccoli", "butter", "garlic"],
        "Sear steak to preference; saute broccoli in garlic butter.",
    ),
    snacks: [
        meal("Cheese and Olives", &["aged cheddar", "olives"], "Plate and serve."),
        meal("Macadamia Nuts", &["macadamia nuts"], "One small handful."),
    ],
    supplements: &["Electrolytes (sodium, potassium, magnesium)", "Omega-3 fish oil"],
    guidance: &[
        "Keep net carbs under 30 g per day to stay in ketosis.",
        "Salt your food; low-carb diets flush sodium.",
    ],
};

static PALEO: DietMenu = DietMenu {
    breakfast: meal(
        "Sweet Potato Hash with Eggs",
        &["sweet potato", "eggs", "bell peppers", "onion"],
        "Dice and pan-roast the vegetables, crack eggs on top and cover until set.",
    ),
    lunch: meal(
        "Turkey Lettuce Wraps",
        &["ground turkey", "butter lettuce", "avocado", "salsa"],
        "Brown turkey with spices and spoon into lettuce cups.",
    ),
    dinner: meal(
        "Herb Roast Chicken with Root Vegetables",
        &["chicken thighs", "carrots", "parsnips", "rosemary", "olive oil"],
        "Roast everything on one tray at 200C for 35 minutes.",
    ),
    snacks: [
        meal("Apple and Almond Butter", &["apple", "almond butter"], "Slice and dip."),
        meal("Beef Jerky and Berries", &["beef jerky", "blueberries"], "Pack together."),
    ],
    supplements: &["Vitamin D3 (2000 IU)", "Magnesium glycinate"],
    guidance: &[
        "Build meals from meat, fish, eggs, vegetables, fruit, nuts and seeds.",
        "Lean on starchy tubers around training for carbs.",
    ],
};

pub fn menu_for(style: DietStyle) -> &'static DietMenu {
    match style {
        DietStyle::Vegan => &VEGAN,
        DietStyle::Vegetarian => &VEGETARIAN,
        DietStyle::Pescatarian => &PESCATARIAN,
        DietStyle::Keto => &KETO,
        DietStyle::Paleo => &PALEO,
        DietStyle::Omnivore => &OMNIVORE,
    }
}
