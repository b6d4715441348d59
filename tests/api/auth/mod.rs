mod logout;
mod verify_token;
