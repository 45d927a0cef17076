pub mod intent;
pub mod lexicon;
pub mod suggest;
