pub mod reservations;
pub mod seating;
