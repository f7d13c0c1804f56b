// Unit tests for the delegate cell
