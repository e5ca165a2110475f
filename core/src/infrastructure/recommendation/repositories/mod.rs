pub mod recommendation_repository;
