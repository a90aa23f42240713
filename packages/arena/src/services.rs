pub mod arena_service;
