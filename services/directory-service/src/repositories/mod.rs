pub mod lawyer_repo;
