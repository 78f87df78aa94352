//!
//! The recipe book.  Titles are not unique, so two recipes can share a name and a lookup by
//! title returns the first.
//!

use serde::{Serialize, Deserialize};

use crate::{*};
use super::require_text;

/// The number of bytes in the ingredients and instructions fields, including the terminator
pub const MAX_TEXT_LENGTH : usize = 2048;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title : FixedText<100>,
    pub ingredients : FixedText<MAX_TEXT_LENGTH>,
    pub instructions : FixedText<MAX_TEXT_LENGTH>,
}

impl Recipe {
    pub fn new(title : &str, ingredients : &str, instructions : &str) -> Self {
        Self {
            title : FixedText::new(title),
            ingredients : FixedText::new(ingredients),
            instructions : FixedText::new(instructions),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecipeChanges {
    pub ingredients : Option<String>,
    pub instructions : Option<String>,
}

impl Record for Recipe {
    type KeyT = FixedText<100>;
    type ChangesT = RecipeChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::NonUnique;

    fn key(&self) -> FixedText<100> {
        self.title.clone()
    }
    fn apply(&mut self, changes : RecipeChanges) {
        super::replace_text(&mut self.ingredients, changes.ingredients);
        super::replace_text(&mut self.instructions, changes.instructions);
    }
    fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)
    }
}

pub struct RecipesConfig();
impl TableConfig for RecipesConfig {
    type RecordT = Recipe;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 50;
    const FILE_NAME : &'static str = "recipes.dat";
}

pub type RecipeBook = Table<RecipesConfig>;

/// Returns the recipes whose title contains `keyword`.  The match is case-sensitive
pub fn search_title<'a>(book : &'a RecipeBook, keyword : &'a str) -> impl Iterator<Item=&'a Recipe> + 'a {
    book.find_all(move |recipe| recipe.title.as_str().contains(keyword))
}
