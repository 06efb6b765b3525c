pub mod pet_handler;
