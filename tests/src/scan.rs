mod hosts;
mod ports;
