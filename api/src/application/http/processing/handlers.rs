pub mod classify_ingredients;
