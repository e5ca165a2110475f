pub mod checkin_repository;
