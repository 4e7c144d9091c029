pub mod score_nutrients;
