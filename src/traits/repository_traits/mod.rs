pub mod sqlserver_repository;
