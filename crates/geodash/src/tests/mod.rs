mod markers;
mod orbit;
mod projection;
