pub mod agregacion;
pub mod tabla;
pub mod tablero;
pub mod ubicacion;
