pub mod sqlx;

#[cfg(test)]
pub mod memory;
