//! Curated volume-to-weight reference data
//!
//! Grams per cup/tbsp/tsp and per count unit for common baking and cooking
//! ingredients, measured the way recipes are usually measured (flour spooned
//! and leveled, brown sugar packed). Loaded once, never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::models::Unit;

/// Max alias_for redirects followed before giving up
const MAX_ALIAS_HOPS: usize = 4;

/// Reference weights for one canonical ingredient
#[derive(Debug, Clone, Default)]
pub struct ConversionEntry {
    pub cup: Option<f64>,
    pub tbsp: Option<f64>,
    pub tsp: Option<f64>,
    pub whole: Option<f64>,
    pub large: Option<f64>,
    pub medium: Option<f64>,
    pub small: Option<f64>,
    pub stick: Option<f64>,
    pub packet: Option<f64>,
    pub density_g_per_ml: Option<f64>,
    /// Redirect target; an alias entry carries no weights of its own
    pub alias_for: Option<&'static str>,
    pub note: Option<&'static str>,
}

impl ConversionEntry {
    const fn empty() -> Self {
        Self {
            cup: None,
            tbsp: None,
            tsp: None,
            whole: None,
            large: None,
            medium: None,
            small: None,
            stick: None,
            packet: None,
            density_g_per_ml: None,
            alias_for: None,
            note: None,
        }
    }

    /// cup, tbsp and tsp weights
    const fn volume(cup: f64, tbsp: f64, tsp: f64) -> Self {
        Self::empty().cup(cup).tbsp(tbsp).tsp(tsp)
    }

    /// Spoon measures only (leaveners, spices, extracts)
    const fn spoons(tbsp: f64, tsp: f64) -> Self {
        Self::empty().tbsp(tbsp).tsp(tsp)
    }

    const fn alias(target: &'static str) -> Self {
        let mut entry = Self::empty();
        entry.alias_for = Some(target);
        entry
    }

    const fn cup(mut self, grams: f64) -> Self {
        self.cup = Some(grams);
        self
    }

    const fn tbsp(mut self, grams: f64) -> Self {
        self.tbsp = Some(grams);
        self
    }

    const fn tsp(mut self, grams: f64) -> Self {
        self.tsp = Some(grams);
        self
    }

    const fn whole(mut self, grams: f64) -> Self {
        self.whole = Some(grams);
        self
    }

    const fn large(mut self, grams: f64) -> Self {
        self.large = Some(grams);
        self
    }

    const fn medium(mut self, grams: f64) -> Self {
        self.medium = Some(grams);
        self
    }

    const fn small(mut self, grams: f64) -> Self {
        self.small = Some(grams);
        self
    }

    const fn stick(mut self, grams: f64) -> Self {
        self.stick = Some(grams);
        self
    }

    const fn packet(mut self, grams: f64) -> Self {
        self.packet = Some(grams);
        self
    }

    const fn density(mut self, g_per_ml: f64) -> Self {
        self.density_g_per_ml = Some(g_per_ml);
        self
    }

    const fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Grams per one of `unit`, if this entry lists that unit directly
    pub fn grams_per(&self, unit: Unit) -> Option<f64> {
        match unit {
            Unit::Cup => self.cup,
            Unit::Tbsp => self.tbsp,
            Unit::Tsp => self.tsp,
            Unit::Whole => self.whole,
            Unit::Large => self.large,
            Unit::Medium => self.medium,
            Unit::Small => self.small,
            Unit::Stick => self.stick,
            Unit::Packet => self.packet,
            _ => None,
        }
    }

    /// Units this entry lists directly
    pub fn units(&self) -> Vec<Unit> {
        [
            Unit::Cup,
            Unit::Tbsp,
            Unit::Tsp,
            Unit::Whole,
            Unit::Large,
            Unit::Medium,
            Unit::Small,
            Unit::Stick,
            Unit::Packet,
        ]
        .into_iter()
        .filter(|u| self.grams_per(*u).is_some())
        .collect()
    }
}

static CONVERSION_TABLE: LazyLock<HashMap<&'static str, ConversionEntry>> = LazyLock::new(|| {
    use ConversionEntry as E;

    let mut m = HashMap::new();

    // === Flours & starches ===
    m.insert("all-purpose flour", E::volume(125.0, 7.8, 2.6).note("Spooned and leveled, not scooped"));
    m.insert("bread flour", E::volume(127.0, 7.9, 2.6));
    m.insert("cake flour", E::volume(114.0, 7.1, 2.4));
    m.insert("whole wheat flour", E::volume(120.0, 7.5, 2.5));
    m.insert("pastry flour", E::volume(106.0, 6.6, 2.2));
    m.insert("almond flour", E::volume(96.0, 6.0, 2.0));
    m.insert("coconut flour", E::volume(112.0, 7.0, 2.3));
    m.insert("cornstarch", E::volume(128.0, 8.0, 2.7));
    m.insert("tapioca starch", E::volume(120.0, 7.5, 2.5));
    m.insert("potato starch", E::volume(160.0, 10.0, 3.3));
    m.insert("rice flour", E::volume(158.0, 9.9, 3.3));
    m.insert("semolina flour", E::volume(167.0, 10.4, 3.5));
    m.insert("rye flour", E::volume(102.0, 6.4, 2.1));

    // === Sugars & sweeteners ===
    m.insert("granulated sugar", E::volume(200.0, 12.5, 4.2));
    m.insert("white sugar", E::alias("granulated sugar"));
    m.insert("brown sugar packed", E::volume(220.0, 13.8, 4.6).note("Firmly packed"));
    m.insert("brown sugar light packed", E::volume(220.0, 13.8, 4.6));
    m.insert("brown sugar dark packed", E::volume(220.0, 13.8, 4.6));
    m.insert("powdered sugar", E::volume(120.0, 7.5, 2.5).note("Unsifted"));
    m.insert("confectioners sugar", E::alias("powdered sugar"));
    m.insert("icing sugar", E::alias("powdered sugar"));
    m.insert("honey", E::volume(340.0, 21.3, 7.1).density(1.43));
    m.insert("maple syrup", E::volume(322.0, 20.1, 6.7).density(1.36));
    m.insert("corn syrup", E::volume(341.0, 21.3, 7.1).density(1.44));
    m.insert("molasses", E::volume(337.0, 21.1, 7.0).density(1.42));
    m.insert("agave nectar", E::volume(336.0, 21.0, 7.0));
    m.insert("stevia", E::empty().tsp(0.5).note("Powdered stevia, very light"));

    // === Fats ===
    m.insert(
        "butter unsalted",
        E::volume(227.0, 14.2, 4.7).stick(113.0).note("1 stick = 1/2 cup = 8 tbsp"),
    );
    m.insert("butter salted", E::volume(227.0, 14.2, 4.7).stick(113.0));
    m.insert("butter", E::alias("butter unsalted"));
    m.insert("vegetable oil", E::volume(218.0, 13.6, 4.5).density(0.92));
    m.insert("canola oil", E::volume(218.0, 13.6, 4.5).density(0.92));
    m.insert("olive oil", E::volume(216.0, 13.5, 4.5).density(0.91));
    m.insert("coconut oil", E::volume(218.0, 13.6, 4.5));
    m.insert("shortening", E::volume(205.0, 12.8, 4.3));
    m.insert("lard", E::volume(205.0, 12.8, 4.3));
    m.insert("margarine", E::volume(227.0, 14.2, 4.7));

    // === Dairy ===
    m.insert("whole milk", E::volume(244.0, 15.3, 5.1).density(1.03));
    m.insert("milk", E::alias("whole milk"));
    m.insert("skim milk", E::volume(245.0, 15.3, 5.1));
    m.insert("2% milk", E::volume(244.0, 15.3, 5.1));
    m.insert("buttermilk", E::volume(245.0, 15.3, 5.1));
    m.insert("heavy cream", E::volume(238.0, 14.9, 5.0));
    m.insert("heavy whipping cream", E::alias("heavy cream"));
    m.insert("light cream", E::volume(240.0, 15.0, 5.0));
    m.insert("half and half", E::volume(242.0, 15.1, 5.0));
    m.insert("sour cream", E::volume(242.0, 15.1, 5.0));
    m.insert("cream cheese", E::volume(232.0, 14.5, 4.8));
    m.insert("yogurt plain", E::volume(245.0, 15.3, 5.1));
    m.insert("greek yogurt", E::volume(280.0, 17.5, 5.8));
    m.insert("ricotta cheese", E::volume(246.0, 15.4, 5.1));
    m.insert("cottage cheese", E::volume(226.0, 14.1, 4.7));
    m.insert("parmesan grated", E::volume(100.0, 6.3, 2.1));
    m.insert("cheddar cheese shredded", E::volume(113.0, 7.1, 2.4));
    m.insert("mozzarella shredded", E::volume(113.0, 7.1, 2.4));
    m.insert("evaporated milk", E::volume(252.0, 15.8, 5.3));
    m.insert("sweetened condensed milk", E::volume(306.0, 19.1, 6.4));

    // === Eggs (without shell) ===
    m.insert("egg whole large", E::empty().whole(50.0).large(50.0).note("Without shell"));
    m.insert("egg whole medium", E::empty().whole(44.0).medium(44.0));
    m.insert("egg whole small", E::empty().whole(38.0).small(38.0));
    m.insert("egg whole extra large", E::empty().whole(56.0).large(56.0));
    m.insert("egg whole jumbo", E::empty().whole(63.0).large(63.0));
    m.insert("egg white large", E::empty().whole(33.0).large(33.0).tbsp(15.0));
    m.insert("egg yolk large", E::empty().whole(17.0).large(17.0).tbsp(14.0));
    m.insert("egg", E::alias("egg whole large"));

    // === Leaveners & salt ===
    m.insert("baking powder", E::spoons(13.8, 4.6));
    m.insert("baking soda", E::spoons(13.8, 4.6));
    m.insert("active dry yeast", E::spoons(8.5, 2.8).packet(7.0).note("1 packet = 2.25 tsp"));
    m.insert("instant yeast", E::spoons(8.5, 2.8).packet(7.0));
    m.insert("cream of tartar", E::spoons(9.4, 3.1));
    m.insert("salt", E::spoons(18.0, 6.0));
    m.insert("table salt", E::alias("salt"));
    m.insert("kosher salt", E::spoons(15.0, 5.0).note("Morton's kosher salt; Diamond Crystal is lighter"));
    m.insert("sea salt fine", E::spoons(18.0, 6.0));

    // === Chocolate & cocoa ===
    m.insert("cocoa powder unsweetened", E::volume(85.0, 5.3, 1.8));
    m.insert("cocoa powder", E::alias("cocoa powder unsweetened"));
    m.insert("dutch process cocoa", E::volume(85.0, 5.3, 1.8));
    m.insert("chocolate chips", E::volume(170.0, 10.6, 3.5));
    m.insert("chocolate chips semisweet", E::volume(170.0, 10.6, 3.5));
    m.insert("chocolate chips milk", E::volume(170.0, 10.6, 3.5));
    m.insert("chocolate chips white", E::volume(170.0, 10.6, 3.5));
    m.insert("chocolate chopped", E::volume(170.0, 10.6, 3.5));

    // === Nuts & seeds ===
    m.insert("almonds whole", E::empty().cup(143.0).tbsp(8.9));
    m.insert("almonds sliced", E::empty().cup(92.0).tbsp(5.8));
    m.insert("almonds slivered", E::empty().cup(108.0).tbsp(6.8));
    m.insert("walnuts chopped", E::empty().cup(120.0).tbsp(7.5));
    m.insert("walnuts halves", E::empty().cup(100.0).tbsp(6.3));
    m.insert("pecans chopped", E::empty().cup(109.0).tbsp(6.8));
    m.insert("pecans halves", E::empty().cup(99.0).tbsp(6.2));
    m.insert("peanuts", E::empty().cup(146.0).tbsp(9.1));
    m.insert("cashews", E::empty().cup(137.0).tbsp(8.6));
    m.insert("hazelnuts", E::empty().cup(135.0).tbsp(8.4));
    m.insert("macadamia nuts", E::empty().cup(134.0).tbsp(8.4));
    m.insert("pistachios shelled", E::empty().cup(123.0).tbsp(7.7));
    m.insert("pine nuts", E::empty().cup(135.0).tbsp(8.4));
    m.insert("sunflower seeds", E::empty().cup(140.0).tbsp(8.8));
    m.insert("pumpkin seeds", E::empty().cup(129.0).tbsp(8.1));
    m.insert("sesame seeds", E::volume(144.0, 9.0, 3.0));
    m.insert("flax seeds", E::volume(168.0, 10.5, 3.5));
    m.insert("chia seeds", E::volume(170.0, 10.6, 3.5));
    m.insert("poppy seeds", E::spoons(8.8, 2.9));

    // === Dried fruit & coconut ===
    m.insert("raisins", E::empty().cup(145.0).tbsp(9.1));
    m.insert("dried cranberries", E::empty().cup(120.0).tbsp(7.5));
    m.insert("dried apricots chopped", E::empty().cup(130.0).tbsp(8.1));
    m.insert("dates chopped", E::empty().cup(147.0).tbsp(9.2));
    m.insert("dried cherries", E::empty().cup(140.0).tbsp(8.8));
    m.insert("dried blueberries", E::empty().cup(140.0).tbsp(8.8));
    m.insert("shredded coconut sweetened", E::empty().cup(93.0).tbsp(5.8));
    m.insert("shredded coconut unsweetened", E::empty().cup(80.0).tbsp(5.0));
    m.insert("coconut flakes", E::empty().cup(75.0).tbsp(4.7));

    // === Grains & crumbs ===
    m.insert("rolled oats", E::empty().cup(80.0).tbsp(5.0));
    m.insert("old fashioned oats", E::alias("rolled oats"));
    m.insert("quick oats", E::empty().cup(80.0).tbsp(5.0));
    m.insert("steel cut oats", E::empty().cup(160.0).tbsp(10.0));
    m.insert("oat flour", E::empty().cup(92.0).tbsp(5.8));
    m.insert("breadcrumbs dry", E::empty().cup(108.0).tbsp(6.8));
    m.insert("breadcrumbs fresh", E::empty().cup(60.0).tbsp(3.8));
    m.insert("panko breadcrumbs", E::empty().cup(60.0).tbsp(3.8));
    m.insert("graham cracker crumbs", E::empty().cup(100.0).tbsp(6.3));
    m.insert("cornmeal", E::volume(157.0, 9.8, 3.3));
    m.insert("polenta", E::alias("cornmeal"));

    // === Extracts & flavorings ===
    m.insert("vanilla extract", E::spoons(13.0, 4.2));
    m.insert("almond extract", E::spoons(13.0, 4.2));
    m.insert("lemon extract", E::spoons(13.0, 4.2));
    m.insert("peppermint extract", E::spoons(13.0, 4.2));
    m.insert("vanilla bean paste", E::spoons(18.0, 6.0));
    m.insert("espresso powder", E::spoons(5.3, 1.8));
    m.insert("instant coffee", E::spoons(5.3, 1.8));

    // === Liquids ===
    m.insert("water", E::volume(237.0, 14.8, 4.9).density(1.0));
    m.insert("lemon juice", E::volume(244.0, 15.3, 5.1));
    m.insert("lime juice", E::volume(244.0, 15.3, 5.1));
    m.insert("orange juice", E::volume(248.0, 15.5, 5.2));
    m.insert("apple cider vinegar", E::volume(239.0, 14.9, 5.0));
    m.insert("white vinegar", E::volume(238.0, 14.9, 5.0));
    m.insert("vegetable broth", E::volume(240.0, 15.0, 5.0));

    // === Nut butters & spreads ===
    m.insert("peanut butter", E::volume(258.0, 16.1, 5.4));
    m.insert("almond butter", E::volume(258.0, 16.1, 5.4));
    m.insert("nutella", E::volume(290.0, 18.1, 6.0));
    m.insert("tahini", E::volume(240.0, 15.0, 5.0));

    // === Ground spices ===
    m.insert("cinnamon ground", E::spoons(7.8, 2.6));
    m.insert("nutmeg ground", E::spoons(7.0, 2.3));
    m.insert("ginger ground", E::spoons(5.4, 1.8));
    m.insert("allspice ground", E::spoons(6.0, 2.0));
    m.insert("cloves ground", E::spoons(6.6, 2.2));
    m.insert("cardamom ground", E::spoons(5.8, 1.9));
    m.insert("pumpkin pie spice", E::spoons(6.0, 2.0));
    m.insert("apple pie spice", E::spoons(6.0, 2.0));

    // === Fruit ===
    m.insert("banana mashed", E::empty().cup(225.0).whole(118.0).medium(118.0).large(136.0));
    m.insert("applesauce", E::empty().cup(244.0).tbsp(15.3));
    m.insert("pumpkin puree", E::empty().cup(245.0).tbsp(15.3));
    m.insert("lemon zest", E::spoons(6.0, 2.0));
    m.insert("orange zest", E::spoons(6.0, 2.0));
    m.insert("raspberries fresh", E::empty().cup(123.0));
    m.insert("blueberries fresh", E::empty().cup(148.0));
    m.insert("strawberries sliced", E::empty().cup(166.0));

    m
});

/// Common recipe names mapped to canonical table names
///
/// Order matters: partial matching walks this list front to back.
pub static INGREDIENT_ALIASES: &[(&str, &str)] = &[
    ("flour", "all-purpose flour"),
    ("ap flour", "all-purpose flour"),
    ("plain flour", "all-purpose flour"),
    ("white flour", "all-purpose flour"),
    ("self-rising flour", "all-purpose flour"),
    ("self rising flour", "all-purpose flour"),
    ("sugar", "granulated sugar"),
    ("white sugar", "granulated sugar"),
    ("caster sugar", "granulated sugar"),
    ("superfine sugar", "granulated sugar"),
    ("light brown sugar", "brown sugar light packed"),
    ("dark brown sugar", "brown sugar dark packed"),
    ("brown sugar", "brown sugar packed"),
    ("confectioner's sugar", "powdered sugar"),
    ("icing sugar", "powdered sugar"),
    ("10x sugar", "powdered sugar"),
    ("unsalted butter", "butter unsalted"),
    ("salted butter", "butter salted"),
    ("sweet cream butter", "butter unsalted"),
    ("large egg", "egg whole large"),
    ("large eggs", "egg whole large"),
    ("eggs", "egg whole large"),
    ("egg", "egg whole large"),
    ("egg whites", "egg white large"),
    ("egg yolks", "egg yolk large"),
    ("egg white", "egg white large"),
    ("egg yolk", "egg yolk large"),
    ("2 percent milk", "2% milk"),
    ("1 percent milk", "skim milk"),
    ("nonfat milk", "skim milk"),
    ("fat free milk", "skim milk"),
    ("oil", "vegetable oil"),
    ("cooking oil", "vegetable oil"),
    ("neutral oil", "vegetable oil"),
    ("extra virgin olive oil", "olive oil"),
    ("evoo", "olive oil"),
    ("oats", "rolled oats"),
    ("quick cooking oats", "quick oats"),
    ("instant oats", "quick oats"),
    ("vanilla", "vanilla extract"),
    ("pure vanilla extract", "vanilla extract"),
    ("chocolate", "chocolate chips semisweet"),
    ("semi-sweet chocolate chips", "chocolate chips semisweet"),
    ("semisweet chocolate", "chocolate chips semisweet"),
    ("semisweet chocolate chips", "chocolate chips semisweet"),
    ("cocoa", "cocoa powder unsweetened"),
    ("unsweetened cocoa", "cocoa powder unsweetened"),
    ("natural cocoa powder", "cocoa powder unsweetened"),
    ("bittersweet chocolate", "chocolate chips semisweet"),
    ("white chocolate chips", "chocolate chips white"),
    ("milk chocolate chips", "chocolate chips milk"),
    ("whipping cream", "heavy cream"),
    ("cream", "heavy cream"),
    ("cinnamon", "cinnamon ground"),
    ("nutmeg", "nutmeg ground"),
    ("ginger", "ginger ground"),
    ("baking cocoa", "cocoa powder unsweetened"),
    ("raspberries", "raspberries fresh"),
    ("blueberries", "blueberries fresh"),
    ("strawberries", "strawberries sliced"),
];

/// Exact alias lookup
pub fn alias_target(name: &str) -> Option<&'static str> {
    INGREDIENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

/// True when `name` is a table key (alias entries included)
pub fn contains(name: &str) -> bool {
    CONVERSION_TABLE.contains_key(name)
}

/// Look up an ingredient, following alias_for redirects
///
/// Returns the name of the entry that actually holds the data.
pub fn lookup(name: &str) -> Option<(&'static str, &'static ConversionEntry)> {
    let (mut key, mut entry) = CONVERSION_TABLE.get_key_value(name)?;

    for _ in 0..MAX_ALIAS_HOPS {
        match entry.alias_for {
            Some(target) => {
                let (k, e) = CONVERSION_TABLE.get_key_value(target)?;
                key = k;
                entry = e;
            }
            None => return Some((*key, entry)),
        }
    }

    tracing::warn!("Alias chain for '{}' exceeds {} hops", name, MAX_ALIAS_HOPS);
    None
}

/// An ingredient with curated conversion data
#[derive(Debug, Clone, Serialize)]
pub struct SupportedIngredient {
    pub name: &'static str,
    pub units: Vec<Unit>,
    pub has_density: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Every non-alias table entry, sorted by name
pub fn supported_ingredients() -> Vec<SupportedIngredient> {
    let mut list: Vec<SupportedIngredient> = CONVERSION_TABLE
        .iter()
        .filter(|(_, entry)| entry.alias_for.is_none())
        .map(|(name, entry)| SupportedIngredient {
            name: *name,
            units: entry.units(),
            has_density: entry.density_g_per_ml.is_some(),
            note: entry.note,
        })
        .collect();
    list.sort_by(|a, b| a.name.cmp(b.name));
    list
}
