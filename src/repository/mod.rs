pub mod sqlserver_repository_impl;
