//! Food ratings: highest-rated food per cuisine under rating changes.
//!
//! One dispatcher per cuisine, keyed by food name. Ratings change through
//! [`edit`](crate::dispatcher::Dispatcher::edit), so a burst of changes leaves
//! stale snapshots that [`highest_rated`](FoodRatings::highest_rated) discards
//! as it peeks. Ties go to the lexicographically smaller name.
//!
//! ## Example
//!
//! ```
//! use lazydispatch::apps::FoodRatings;
//!
//! let mut fr = FoodRatings::new([
//!     ("kimchi", "korean", 9),
//!     ("miso", "japanese", 12),
//!     ("sushi", "japanese", 8),
//!     ("moussaka", "greek", 15),
//!     ("ramen", "japanese", 14),
//!     ("bulgogi", "korean", 7),
//! ]);
//! assert_eq!(fr.highest_rated("korean"), Some("kimchi"));
//! assert_eq!(fr.highest_rated("japanese"), Some("ramen"));
//! fr.change_rating("sushi", 16);
//! assert_eq!(fr.highest_rated("japanese"), Some("sushi"));
//! fr.change_rating("ramen", 16);
//! assert_eq!(fr.highest_rated("japanese"), Some("ramen"));
//! ```

use rustc_hash::FxHashMap;

use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;
use crate::tie_break::LowerKeyFirst;

type CuisineBoard = Dispatcher<String, i32, (), LowerKeyFirst>;

#[derive(Debug, Default)]
pub struct FoodRatings {
    cuisine_of: FxHashMap<String, String>,
    boards: FxHashMap<String, CuisineBoard>,
}

impl FoodRatings {
    /// Builds the rating system from `(food, cuisine, rating)` entries.
    ///
    /// A food listed twice keeps its last entry.
    pub fn new<F, C>(entries: impl IntoIterator<Item = (F, C, i32)>) -> Self
    where
        F: Into<String>,
        C: Into<String>,
    {
        let mut ratings = Self::default();
        for (food, cuisine, rating) in entries {
            ratings.insert(food.into(), cuisine.into(), rating);
        }
        ratings
    }

    /// Builds the rating system from parallel columns.
    ///
    /// Fails if the three columns differ in length.
    pub fn from_columns<F, C>(
        foods: Vec<F>,
        cuisines: Vec<C>,
        ratings: Vec<i32>,
    ) -> Result<Self, ConfigError>
    where
        F: Into<String>,
        C: Into<String>,
    {
        if foods.len() != cuisines.len() || foods.len() != ratings.len() {
            return Err(ConfigError::new(format!(
                "column lengths differ: {} foods, {} cuisines, {} ratings",
                foods.len(),
                cuisines.len(),
                ratings.len()
            )));
        }
        Ok(Self::new(
            foods
                .into_iter()
                .zip(cuisines)
                .zip(ratings)
                .map(|((food, cuisine), rating)| (food, cuisine, rating)),
        ))
    }

    /// Sets the rating of `food`; unknown foods are ignored.
    pub fn change_rating(&mut self, food: &str, new_rating: i32) {
        let Some((food, cuisine)) = self.cuisine_of.get_key_value(food) else {
            return;
        };
        if let Some(board) = self.boards.get_mut(cuisine) {
            board.edit(food, new_rating);
        }
    }

    /// Returns the highest-rated food of `cuisine`, or `None` for an unknown
    /// cuisine.
    pub fn highest_rated(&mut self, cuisine: &str) -> Option<&str> {
        self.boards
            .get_mut(cuisine)?
            .peek_top()
            .map(|(food, _, _)| food.as_str())
    }

    /// Returns the current rating of `food`.
    pub fn rating_of(&self, food: &str) -> Option<i32> {
        let cuisine = self.cuisine_of.get(food)?;
        self.boards
            .get(cuisine)?
            .priority_of(&food.to_owned())
            .copied()
    }

    /// Returns the cuisine `food` belongs to.
    pub fn cuisine_of(&self, food: &str) -> Option<&str> {
        self.cuisine_of.get(food).map(String::as_str)
    }

    /// Number of foods tracked across all cuisines.
    pub fn len(&self) -> usize {
        self.cuisine_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuisine_of.is_empty()
    }

    fn insert(&mut self, food: String, cuisine: String, rating: i32) {
        if let Some(previous) = self.cuisine_of.insert(food.clone(), cuisine.clone()) {
            if previous != cuisine {
                if let Some(board) = self.boards.get_mut(&previous) {
                    board.remove(&food);
                }
            }
        }
        self.boards
            .entry(cuisine)
            .or_default()
            .add(food, rating, ());
    }
}
