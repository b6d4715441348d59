mod assignment;
mod lifecycle;
mod search;
